//! The user's surveys, newest first. This is where the creation form returns
//! after a successful submit.

use crate::api::{self, ApiError};
use crate::helpers::show_toast;
use common::model::survey::Survey;
use yew::platform::spawn_local;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct SurveyListProps {
    pub user_id: AttrValue,
    pub on_create: Callback<()>,
}

pub enum Msg {
    Loaded(Result<Vec<Survey>, ApiError>),
}

pub struct SurveyList {
    surveys: Vec<Survey>,
    loading: bool,
}

impl Component for SurveyList {
    type Message = Msg;
    type Properties = SurveyListProps;

    fn create(ctx: &Context<Self>) -> Self {
        let link = ctx.link().clone();
        let user_id = ctx.props().user_id.clone();
        spawn_local(async move {
            link.send_message(Msg::Loaded(api::get_surveys(&user_id).await));
        });
        Self {
            surveys: Vec::new(),
            loading: true,
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Loaded(Ok(surveys)) => {
                self.surveys = surveys;
                self.loading = false;
            }
            Msg::Loaded(Err(err)) => {
                gloo_console::error!(format!("loading surveys failed: {}", err));
                show_toast(&format!("Could not load surveys. {}", err));
                self.loading = false;
            }
        }
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let on_create = ctx.props().on_create.reform(|_: MouseEvent| ());

        html! {
            <div class="survey-list">
                <div class="page-header">
                    <h1>{"Surveys"}</h1>
                    <button type="button" class="primary" onclick={on_create}>{"Create Survey"}</button>
                </div>
                {
                    if self.loading {
                        html! { <div class="spinner" aria-label="Loading surveys"></div> }
                    } else if self.surveys.is_empty() {
                        html! { <p class="notice">{"You have no surveys yet."}</p> }
                    } else {
                        html! {
                            <table class="surveys">
                                <thead>
                                    <tr>
                                        <th>{"QR"}</th>
                                        <th>{"Logo"}</th>
                                        <th>{"Name"}</th>
                                        <th>{"Status"}</th>
                                        <th>{"Code"}</th>
                                        <th>{"Link"}</th>
                                    </tr>
                                </thead>
                                <tbody>
                                    { for self.surveys.iter().map(survey_row) }
                                </tbody>
                            </table>
                        }
                    }
                }
            </div>
        }
    }
}

fn survey_row(survey: &Survey) -> Html {
    html! {
        <tr key={survey.id.clone()}>
            <td><img class="qr" src={survey.qr_code.clone()} alt={format!("QR code for {}", survey.survey_name)} /></td>
            <td>
                if let Some(logo) = &survey.logo_path {
                    <img class="logo-thumb" src={logo.clone()} alt="" />
                }
            </td>
            <td>{ survey.survey_name.clone() }</td>
            <td><span class="status">{ survey.survey_status.clone() }</span></td>
            <td><code>{ survey.short_code.clone() }</code></td>
            <td><a href={survey.url.clone()} target="_blank" rel="noopener">{ survey.url.clone() }</a></td>
        </tr>
    }
}
