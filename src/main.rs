fn main() {
    hr_agent_app_lib::run()
}
