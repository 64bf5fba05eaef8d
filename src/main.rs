mod probe_args;
mod probe_runtime;

fn main() {
    std::process::exit(probe_runtime::run());
}
