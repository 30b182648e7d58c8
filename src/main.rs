use skirmish_flow::StartFlow;

fn main() {
    let flow = match StartFlow::from_args() {
        Ok(flow) => flow,
        Err(err) => {
            eprintln!("{}", err);
            std::process::exit(1);
        }
    };

    // Interfaces own the game loop, only one of them can be active.
    // Switch between them via feature flags.
    #[cfg(feature = "interface_tui")]
    {
        if let Err(err) = skirmish_tui::game_main(flow) {
            eprintln!("{}", err);
            std::process::exit(1);
        }
    }
}
