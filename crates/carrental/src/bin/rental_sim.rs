//! rental-sim - Simulate a car rental and print the bill.

fn main() -> std::process::ExitCode {
    carrental::cmd::sim::main()
}
