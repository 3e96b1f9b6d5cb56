pub fn join_certificates(lines: &[String]) -> String {
    lines.join("\n")
}

pub fn trust_store_uri(bucket: &str, key: &str) -> String {
    format!("s3://{bucket}/{key}")
}
