#[cfg(docsrs)]
fn probe_system_deps() {
    // do not probe libraries since the docs.rs environment doesn't have them
}

#[cfg(not(docsrs))]
fn probe_system_deps() {
    if let Err(e) = system_deps::Config::new().probe() {
        eprintln!("{e}");
        std::process::exit(1);
    }
}

fn main() {
    probe_system_deps();
}
