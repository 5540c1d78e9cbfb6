fn main() -> anyhow::Result<()> {
    column_sweep::command::args_handle()
}
