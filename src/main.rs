fn main() -> anyhow::Result<()> {
    maze_chase::run()
}
