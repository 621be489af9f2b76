#![forbid(unsafe_code)]

/// `embed_migrations!` does not track the migration directory on its own,
/// so the crate is rebuilt whenever a migration is added or edited.
fn main() {
    println!("cargo:rerun-if-changed=./migrations");
}
