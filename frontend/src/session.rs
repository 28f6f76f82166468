//! The signed-in user, as left in local storage by the identity provider.
//!
//! Components never look this up themselves: `App` reads it once and passes
//! it down as a property.

use yew::AttrValue;

const USER_ID_KEY: &str = "reviewzone.user_id";

#[derive(Clone, Debug, PartialEq)]
pub struct CurrentUser {
    pub id: AttrValue,
}

pub fn current_user() -> Option<CurrentUser> {
    let storage = web_sys::window()?.local_storage().ok()??;
    let id = storage.get_item(USER_ID_KEY).ok()??;
    let id = id.trim();
    if id.is_empty() {
        return None;
    }
    Some(CurrentUser {
        id: AttrValue::from(id.to_string()),
    })
}
