//! HTML bodies for the enrollment e-mails.
//!
//! Every interpolated value is escaped; names and course titles come straight from request bodies.

pub const ENROLLED_SUBJECT: &str = "Course Registration Successful";
pub const UPDATED_SUBJECT: &str = "Successfully Updated the Course";
pub const DROPPED_SUBJECT: &str = "Successfully Deleted the Course";

fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
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

pub fn enrolled(full_name: &str, course_name: &str) -> String {
    format!(
        "<h2>Hello {},</h2>\n\
         <p>You have successfully registered for the course:</p>\n\
         <p><strong>{}</strong></p>\n\
         <br/>\n\
         <p>Thank you for registering!</p>\n",
        escape(full_name),
        escape(course_name),
    )
}

pub fn updated(full_name: &str, course_name: &str) -> String {
    format!(
        "<h2>Good day, {}</h2>\n\
         <p>You have successfully updated the course:</p>\n\
         <p><strong>{}</strong></p>\n\
         <br/>\n\
         <p>Thank you!</p>\n",
        escape(full_name),
        escape(course_name),
    )
}

pub fn dropped(full_name: &str, course_name: &str) -> String {
    format!(
        "<h2>Good day, {}</h2>\n\
         <p>You have successfully dropped <strong>{}</strong>.</p>\n\
         <p>Thank you!</p>\n",
        escape(full_name),
        escape(course_name),
    )
}
