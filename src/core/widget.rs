//! HTML pages for the upload widget

use crate::analysis::Analysis;

const TITLE: &str = "FVG Pattern Detector";

const STYLE: &str = "body{font-family:sans-serif;max-width:760px;margin:2rem auto;padding:0 1rem}\
img{max-width:100%;border:1px solid #ccc}\
.notice{background:#fde8e8;border:1px solid #e0a0a0;padding:.75rem}\
.trade{color:#1a7f37}.no-trade{color:#b42318}\
li.passed::marker{content:'\\2713  '}li.failed::marker{content:'\\2717  '}";

fn page(body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{TITLE}</title>\n<style>{STYLE}</style>\n</head>\n<body>\n\
         <h1>{TITLE}</h1>\n{body}\n</body>\n</html>\n"
    )
}

/// Escape text for inclusion in HTML content or attribute values.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn upload_form() -> &'static str {
    "<form action=\"/analyze\" method=\"post\" enctype=\"multipart/form-data\">\n\
     <label for=\"file\">Upload Image</label>\n\
     <input id=\"file\" type=\"file\" name=\"file\" accept=\".jpg,.jpeg,.png\" required>\n\
     <button type=\"submit\">Analyze</button>\n</form>"
}

/// Landing page. `notice` carries a startup problem that blocks analysis.
pub fn upload_page(notice: Option<&str>) -> String {
    let mut body = String::from("<p>Upload a chart image and get trade condition analysis.</p>\n");
    match notice {
        Some(message) => {
            body.push_str(&format!("<p class=\"notice\">{}</p>", escape_html(message)));
        }
        None => body.push_str(upload_form()),
    }
    page(&body)
}

pub fn result_page(analysis: &Analysis) -> String {
    let class = if analysis.trade { "trade" } else { "no-trade" };
    let checklist: String = analysis
        .checklist
        .iter()
        .map(|item| {
            format!(
                "<li class=\"{}\">{}</li>\n",
                if item.passed { "passed" } else { "failed" },
                escape_html(&item.question)
            )
        })
        .collect();

    let body = format!(
        "<figure>\n<img src=\"{src}\" alt=\"Uploaded Chart\">\n\
         <figcaption>Uploaded Chart ({width}&times;{height} {format})</figcaption>\n</figure>\n\
         <h2>Result</h2>\n<p class=\"{class}\">{verdict}</p>\n\
         <h3>Checklist</h3>\n<ol>\n{checklist}</ol>\n{form}",
        src = analysis.image.data_url,
        width = analysis.image.width,
        height = analysis.image.height,
        format = analysis.image.format,
        verdict = escape_html(analysis.verdict.message()),
        form = upload_form(),
    );
    page(&body)
}

pub fn error_page(message: &str) -> String {
    let body = format!(
        "<h2>Result</h2>\n<p class=\"notice\">{}</p>\n{}",
        escape_html(message),
        upload_form()
    );
    page(&body)
}
