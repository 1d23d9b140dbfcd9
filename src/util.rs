use rand::distributions::Alphanumeric;
use rand::Rng;

/// A random name for an object that is still being written. Objects are renamed into place once
/// complete, so a reader never sees a partially written object.
pub fn tmp_file_name() -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(12)
        .map(char::from)
        .collect();

    format!("tmp_obj_{suffix}")
}
