use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct SurveyCreateProps {
    /// Authenticated user the survey is created for; sent with every request.
    pub user_id: AttrValue,
    /// Fired after a successful submit and on Cancel. The parent navigates to
    /// the survey list.
    pub on_done: Callback<()>,
}
