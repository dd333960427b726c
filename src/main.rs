fn main() {
    if let Err(err) = perfume_note_graph::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
