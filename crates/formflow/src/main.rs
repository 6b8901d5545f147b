fn main() -> anyhow::Result<()> {
    formflow::cli::main()
}
