pub async fn index() -> &'static str {
    "Blog API"
}
