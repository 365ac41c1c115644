fn main() {
    use show_inclusion::cli::parse;
    let cli = parse();
    show_inclusion::app::init_logging(cli.quiet, cli.verbose);
    let code = show_inclusion::app::run_cli(cli);
    if code != 0 {
        std::process::exit(code);
    }
}
