use crate::components::surveys::create::SurveyCreateComponent;
use crate::components::surveys::list::SurveyList;
use crate::session::{current_user, CurrentUser};
use wasm_bindgen::JsValue;
use yew::{html, Callback, Component, Context, Html};

const LIST_PATH: &str = "/dashboard/surveys";
const CREATE_PATH: &str = "/dashboard/surveys/new";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Route {
    SurveyList,
    CreateSurvey,
}

impl Route {
    fn from_path(path: &str) -> Self {
        match path.trim_end_matches('/') {
            CREATE_PATH => Route::CreateSurvey,
            _ => Route::SurveyList,
        }
    }

    fn path(self) -> &'static str {
        match self {
            Route::SurveyList => LIST_PATH,
            Route::CreateSurvey => CREATE_PATH,
        }
    }
}

pub enum Msg {
    Navigate(Route),
}

pub struct App {
    route: Route,
    user: Option<CurrentUser>,
}

impl Component for App {
    type Message = Msg;
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        let path = web_sys::window()
            .and_then(|w| w.location().pathname().ok())
            .unwrap_or_default();
        Self {
            route: Route::from_path(&path),
            user: current_user(),
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Navigate(route) => {
                if let Some(history) = web_sys::window().and_then(|w| w.history().ok()) {
                    history
                        .push_state_with_url(&JsValue::NULL, "", Some(route.path()))
                        .ok();
                }
                let changed = self.route != route;
                self.route = route;
                changed
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let Some(user) = &self.user else {
            return html! {
                <div class="page">
                    <p class="notice">{"Please sign in to manage your surveys."}</p>
                </div>
            };
        };

        let navigate: Callback<Route> = ctx.link().callback(Msg::Navigate);
        html! {
            <div class="page">
                {
                    match self.route {
                        Route::SurveyList => html! {
                            <SurveyList
                                user_id={user.id.clone()}
                                on_create={navigate.reform(|_: ()| Route::CreateSurvey)}
                            />
                        },
                        Route::CreateSurvey => html! {
                            <SurveyCreateComponent
                                user_id={user.id.clone()}
                                on_done={navigate.reform(|_: ()| Route::SurveyList)}
                            />
                        },
                    }
                }
            </div>
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_resolve_to_routes() {
        assert_eq!(Route::from_path("/dashboard/surveys/new"), Route::CreateSurvey);
        assert_eq!(Route::from_path("/dashboard/surveys/new/"), Route::CreateSurvey);
        assert_eq!(Route::from_path("/dashboard/surveys"), Route::SurveyList);
        assert_eq!(Route::from_path("/"), Route::SurveyList);
        assert_eq!(Route::from_path(Route::CreateSurvey.path()), Route::CreateSurvey);
    }
}
