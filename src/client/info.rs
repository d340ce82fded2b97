use tera::escape_html;

use crate::models::Truck;

/// HTML for a truck's info window. Missing details are left out.
pub fn info_window_content(truck: &Truck) -> String {
    let mut html = format!("<div><h3>{}</h3><div>", escape_html(&truck.name));
    if let Some(address) = &truck.address {
        html.push_str(&format!("<p>{}</p>", escape_html(address)));
    }
    if let Some(items) = &truck.fooditems {
        html.push_str(&format!("<p>{}</p>", escape_html(items)));
    }
    if let Some(schedule) = &truck.schedule {
        html.push_str(&format!(
            "<p><a href=\"{}\" target=\"_blank\">Download Schedule</a></p>",
            escape_html(schedule)
        ));
    }
    html.push_str("</div></div>");
    html
}
