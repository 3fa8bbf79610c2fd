//! Profile display formatting

use crate::models::UserDto;

use super::{opt_id, DisplayOptions};

pub fn format_user_details(user: &UserDto, options: &DisplayOptions) -> String {
    let mut output = String::new();
    output.push_str(&format!("User:          {}\n", opt_id(user.id)));
    output.push_str(&format!("Name:          {}\n", user.name.as_deref().unwrap_or("")));
    output.push_str(&format!("Email:         {}\n", user.email.as_deref().unwrap_or("")));
    output.push_str(&format!("Balance:       {}\n", options.money(user.balance)));
    if let Some(created_at) = user.created_at {
        output.push_str(&format!(
            "Member since:  {}\n",
            options.date(Some(created_at.date_naive()))
        ));
    }
    output
}
