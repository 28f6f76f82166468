//! Survey creation form: root module wiring the Yew `Component` implementation
//! with submodules for state, messages, update logic and view rendering.
//!
//! The product catalog is fetched on every mount, never cached, so products
//! added elsewhere show up the next time the form opens.

use yew::platform::spawn_local;
use yew::prelude::*;

use crate::api;

mod messages;
mod props;
mod state;
mod update;
mod view;

pub use messages::{DraftField, Msg};
pub use props::SurveyCreateProps;
pub use state::SurveyCreateComponent;

impl Component for SurveyCreateComponent {
    type Message = Msg;
    type Properties = SurveyCreateProps;

    fn create(_ctx: &Context<Self>) -> Self {
        SurveyCreateComponent::new()
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        update::update(self, ctx, msg)
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        view::view(self, ctx)
    }

    fn rendered(&mut self, ctx: &Context<Self>, first_render: bool) {
        if first_render && !self.loaded {
            self.loaded = true;

            let link = ctx.link().clone();
            let user_id = ctx.props().user_id.clone();
            spawn_local(async move {
                link.send_message(Msg::ProductsLoaded(api::get_products(&user_id).await));
            });

            let link = ctx.link().clone();
            spawn_local(async move {
                link.send_message(Msg::EnumsLoaded(api::get_enums().await));
            });
        }
    }

    fn destroy(&mut self, _ctx: &Context<Self>) {
        self.release_preview();
    }
}
