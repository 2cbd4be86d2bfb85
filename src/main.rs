fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut clog = colog::default_builder();
    clog.filter(None, log::LevelFilter::Info);
    // RUST_LOG, when set, takes precedence over the default level.
    clog.parse_default_env();
    clog.init();

    curate::runtime::run()
}
