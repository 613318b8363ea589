//! The HTML upload form served at the root path.

use axum::response::Html;

const UPLOAD_FORM: &str = r#"<!doctype html>
<html>
<head>
    <meta charset="utf-8" />
    <title>Potvrzení o přijatých platbách</title>
</head>
<body>
    <h1>Nahrajte bankovní výpis (CSV)</h1>
    <form method="POST" action="/confirmations" enctype="multipart/form-data">
        <input type="file" name="csv_file" accept=".csv" required />
        <button type="submit">Vygenerovat potvrzení</button>
    </form>
</body>
</html>
"#;

pub async fn upload_form() -> Html<&'static str> {
    Html(UPLOAD_FORM)
}
