use rand::Rng;

/// Generates an alphanumeric secret of the given length.
/// Used for default admin credentials when none are configured.
pub fn create_random_secret(secret_len: usize) -> String {
    let rng = rand::thread_rng();
    rng.sample_iter(&rand::distributions::Alphanumeric)
        .take(secret_len)
        .map(char::from)
        .collect()
}
