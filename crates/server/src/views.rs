//! Server-side HTML for the list and edit pages.

use std::fmt::Write;

use service::records::Record;

const INDEX_STYLE: &str = "\
body { font-family: Arial; background:#f2f2f2; padding:20px; }
.card { background:white; padding:20px; border-radius:8px; width:500px; margin:auto; }
input { width:100%; padding:10px; margin:5px 0; }
button { padding:10px; margin:5px 0; width:100%; background:blue; color:white; border:none; }
table { width:100%; margin-top:20px; border-collapse:collapse; }
td, th { border:1px solid #ccc; padding:8px; text-align:center; }
a { text-decoration:none; padding:5px 10px; border-radius:4px; }
.delete { background:red; color:white; }
.edit { background:green; color:white; }
";

const EDIT_STYLE: &str = "\
body { font-family: Arial; background:#f2f2f2; padding:20px; }
.card { background:white; padding:20px; border-radius:8px; width:400px; margin:auto; }
input { width:100%; padding:10px; margin:5px 0; }
button { padding:10px; width:100%; background:green; color:white; border:none; }
";

/// Escape text for use in element content and quoted attributes.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn page(title: &str, style: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{title}</title>\n<style>\n{style}</style>\n</head>\n<body>\n<div class=\"card\">\n{body}</div>\n</body>\n</html>\n"
    )
}

/// Add form plus a table of every record, in the order given.
pub fn index_page(records: &[Record]) -> String {
    let mut body = String::from(
        "<h2>Add Data</h2>\n\
         <form method=\"POST\" action=\"/add\">\n\
         <input name=\"name\" placeholder=\"Enter name\" required>\n\
         <input name=\"value\" placeholder=\"Enter value\" required>\n\
         <button type=\"submit\">Add</button>\n\
         </form>\n\
         <h3>Stored Data</h3>\n\
         <table>\n\
         <tr><th>Name</th><th>Value</th><th>Actions</th></tr>\n",
    );
    for record in records {
        let link = urlencoding::encode(&record.name);
        let _ = write!(
            body,
            "<tr>\n<td>{name}</td>\n<td>{value}</td>\n<td>\n\
             <a class=\"edit\" href=\"/edit/{link}\">Edit</a>\n\
             <a class=\"delete\" href=\"/delete/{link}\">Delete</a>\n\
             </td>\n</tr>\n",
            name = escape_html(&record.name),
            value = escape_html(&record.value),
        );
    }
    body.push_str("</table>\n");
    page("Records", INDEX_STYLE, &body)
}

/// Edit form pre-filled with `value`; posts back to the current URL.
pub fn edit_page(value: &str) -> String {
    let body = format!(
        "<h2>Edit Entry</h2>\n\
         <form method=\"POST\">\n\
         <input name=\"value\" value=\"{}\" required>\n\
         <button type=\"submit\">Update</button>\n\
         </form>\n",
        escape_html(value)
    );
    page("Edit", EDIT_STYLE, &body)
}
