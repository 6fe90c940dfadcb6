/// Scope string for a Secrets Manager entry. The trailing wildcard is
/// required because Secrets Manager appends a random six-character suffix to
/// the name when the secret is created.
pub fn secret_arn(region: &str, account: &str, name: &str) -> String {
    format!("arn:aws:secretsmanager:{region}:{account}:secret:{name}-*")
}
