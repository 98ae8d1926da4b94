fn main() {
    std::process::exit(blockqueue::app::startup::startup());
}
