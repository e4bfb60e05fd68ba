fn main() {
    modshell::app::startup::startup();
}
