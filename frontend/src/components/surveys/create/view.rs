//! View rendering for the survey creation form.

use common::model::enums::EnumOption;
use yew::html::Scope;
use yew::prelude::*;

use crate::components::form::{FormInput, FormSelect};
use crate::components::surveys::logo_upload::LogoUpload;
use crate::components::surveys::product_grid::ProductGrid;

use super::messages::{DraftField, Msg};
use super::state::SurveyCreateComponent;

pub fn view(component: &SurveyCreateComponent, ctx: &Context<SurveyCreateComponent>) -> Html {
    let link = ctx.link();
    let onsubmit = link.callback(|e: SubmitEvent| {
        e.prevent_default();
        Msg::Submit
    });

    html! {
        <div class="survey-create">
            <div class="page-header">
                <h1>{"Create Survey"}</h1>
            </div>
            <form class="survey-form" {onsubmit} novalidate={true}>
                <FormInput
                    id="survey-name"
                    label="Survey name"
                    placeholder="e.g. Spring launch"
                    value={AttrValue::from(component.draft.survey_name.clone())}
                    error={component.error_for(DraftField::SurveyName.key())}
                    oninput={link.callback(|value: String| Msg::SetField(DraftField::SurveyName, value))}
                />
                { select(component, link, DraftField::SurveyStyle, "Survey type", &component.enums.survey_style) }
                { select(component, link, DraftField::MinimumReviewLength, "Minimum review length", &component.enums.minimum_review_length) }
                { select(component, link, DraftField::MinimumStarRating, "Minimum star rating", &component.enums.minimum_star_rating) }
                { select(component, link, DraftField::TimeDelay, "Time delay", &component.enums.time_delay) }

                <LogoUpload
                    preview={component.logo_preview.clone().map(AttrValue::from)}
                    file_name={component.logo_file.as_ref().map(|f| AttrValue::from(f.name()))}
                    size={component.draft.logo.as_ref().map(|logo| logo.size())}
                    error={component.error_for("logo")}
                    on_select={link.callback(Msg::LogoSelected)}
                    on_clear={link.callback(|_: ()| Msg::LogoCleared)}
                />

                <ProductGrid
                    products={component.products.clone()}
                    selected={component.draft.product_ids.clone()}
                    loading={component.products_loading}
                    adding={component.product_adding}
                    error={component.error_for("product_ids")}
                    on_toggle={link.callback(Msg::ToggleProduct)}
                    on_add={link.callback(Msg::AddProduct)}
                />

                { build_actions(component, link) }
            </form>
        </div>
    }
}

fn select(
    component: &SurveyCreateComponent,
    link: &Scope<SurveyCreateComponent>,
    field: DraftField,
    label: &'static str,
    options: &[EnumOption],
) -> Html {
    html! {
        <FormSelect
            id={field.key()}
            {label}
            value={AttrValue::from(field.get(&component.draft).to_string())}
            options={options.to_vec()}
            error={component.error_for(field.key())}
            onchange={link.callback(move |value: String| Msg::SetField(field, value))}
        />
    }
}

fn build_actions(component: &SurveyCreateComponent, link: &Scope<SurveyCreateComponent>) -> Html {
    let submit_label = if component.is_submitting {
        "Creating Survey..."
    } else {
        "Create Survey"
    };

    html! {
        <div class="form-actions">
            <button
                type="button"
                class="secondary"
                disabled={component.is_submitting}
                onclick={link.callback(|_| Msg::Cancel)}
            >
                {"Cancel"}
            </button>
            <button type="submit" class="primary" disabled={component.is_submitting}>
                if component.is_submitting {
                    <span class="spinner small" aria-hidden="true"></span>
                }
                { submit_label }
            </button>
        </div>
    }
}
