fn main() -> anyhow::Result<()> {
    forms::cli::main()
}
