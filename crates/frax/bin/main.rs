fn main() -> eyre::Result<()> {
    frax::args::run()
}
