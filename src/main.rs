fn main() -> anyhow::Result<()> {
    assistant_console::cli::run()
}
