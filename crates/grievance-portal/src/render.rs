//! HTML fragments for the grievance list.
//!
//! Every stored text field is escaped before it is placed in markup.

use grievance_core::models::grievance::Grievance;

pub const EMPTY_LIST_HTML: &str = "<p class=\"empty-state\">No grievances submitted yet!</p>";

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

pub fn render_grievance(grievance: &Grievance) -> String {
    format!(
        "<div class=\"grievance-item\" data-id=\"{id}\">\n\
         \x20   <div class=\"grievance-title\">{title}</div>\n\
         \x20   <div class=\"grievance-content\">{complaint}</div>\n\
         \x20   <div class=\"grievance-meta\">\n\
         \x20       <span>{mood} | Solution: {severity}</span>\n\
         \x20       <span>{timestamp}</span>\n\
         \x20   </div>\n\
         </div>\n",
        id = grievance.id,
        title = escape_html(&grievance.title),
        complaint = escape_html(&grievance.complaint),
        mood = escape_html(&grievance.mood),
        severity = escape_html(&grievance.severity),
        timestamp = escape_html(&grievance.timestamp),
    )
}

/// Render `grievances` in the order given.
pub fn render_list(grievances: &[Grievance]) -> String {
    if grievances.is_empty() {
        return EMPTY_LIST_HTML.to_string();
    }
    grievances.iter().map(render_grievance).collect()
}
