//! Update function for the survey creation form.
//!
//! Submission runs the shared draft rules first; nothing is sent while any
//! field fails. A 422 from the server lands back in `errors` so the same
//! inline messages are shown for server-side rejections.

use gloo_file::futures::read_as_bytes;
use yew::platform::spawn_local;
use yew::prelude::*;

use common::model::product::{NewProduct, Product};
use common::model::survey::LogoFile;
use common::validation;

use crate::api::{self, ApiError};
use crate::helpers::show_toast;

use super::messages::Msg;
use super::state::SurveyCreateComponent;

pub fn update(
    component: &mut SurveyCreateComponent,
    ctx: &Context<SurveyCreateComponent>,
    msg: Msg,
) -> bool {
    match msg {
        Msg::ProductsLoaded(result) => {
            component.products_loading = false;
            match result {
                Ok(products) => component.products = products,
                Err(err) => {
                    gloo_console::error!(format!("loading products failed: {}", err));
                    show_toast(&format!("Could not load products. {}", err));
                }
            }
            true
        }
        Msg::EnumsLoaded(result) => {
            match result {
                Ok(enums) => component.enums = enums,
                Err(err) => {
                    gloo_console::error!(format!("loading options failed: {}", err));
                    show_toast(&format!("Could not load survey options. {}", err));
                }
            }
            true
        }
        Msg::SetField(field, value) => {
            field.set(&mut component.draft, value);
            component.errors.remove(field.key());
            true
        }
        Msg::LogoSelected(file) => {
            component.release_preview();
            component.logo_preview = web_sys::Url::create_object_url_with_blob(&file).ok();
            component.draft.logo = None;
            component.errors.remove("logo");

            let pick = component.begin_logo_pick();
            let link = ctx.link().clone();
            let file_name = file.name();
            let content_type = Some(file.type_()).filter(|t| !t.is_empty());
            let picked = gloo_file::File::from(file.clone());
            component.logo_file = Some(file);
            spawn_local(async move {
                match read_as_bytes(&picked).await {
                    Ok(bytes) => link.send_message(Msg::LogoRead(
                        pick,
                        LogoFile {
                            file_name,
                            content_type,
                            bytes,
                        },
                    )),
                    Err(err) => {
                        gloo_console::error!(format!("reading logo failed: {}", err));
                        link.send_message(Msg::LogoReadFailed(pick));
                    }
                }
            });
            true
        }
        Msg::LogoRead(pick, logo) => {
            // A later pick may have replaced the file while this one was read.
            let current = component.is_current_pick(pick);
            if current {
                component.draft.logo = Some(logo);
            }
            current
        }
        Msg::LogoReadFailed(pick) => {
            if !component.is_current_pick(pick) {
                return false;
            }
            show_toast("Could not read the selected logo.");
            ctx.link().send_message(Msg::LogoCleared);
            false
        }
        Msg::LogoCleared => {
            component.begin_logo_pick();
            component.release_preview();
            component.logo_file = None;
            component.draft.logo = None;
            component.errors.remove("logo");
            true
        }
        Msg::ToggleProduct(id) => {
            toggle_selection(&mut component.draft.product_ids, id);
            component.errors.remove("product_ids");
            true
        }
        Msg::AddProduct(product_name) => {
            if component.product_adding {
                return false;
            }
            component.product_adding = true;

            let link = ctx.link().clone();
            let user_id = ctx.props().user_id.clone();
            spawn_local(async move {
                let product = NewProduct {
                    product_name,
                    image_url: None,
                };
                let result = api::create_product(&user_id, &product).await;
                link.send_message(Msg::ProductAdded(result));
            });
            true
        }
        Msg::ProductAdded(result) => {
            component.product_adding = false;
            match result {
                Ok(product) => {
                    toggle_selection(&mut component.draft.product_ids, product.id.clone());
                    component.errors.remove("product_ids");
                    insert_by_name(&mut component.products, product);
                }
                Err(err) => {
                    gloo_console::error!(format!("adding product failed: {}", err));
                    show_toast(&format!("Could not add the product. {}", err));
                }
            }
            true
        }
        Msg::Submit => {
            if component.is_submitting {
                return false;
            }
            if component.logo_file.is_some() && component.draft.logo.is_none() {
                show_toast("The logo is still loading, try again in a moment.");
                return false;
            }
            if let Err(errors) = validation::check(&component.draft) {
                component.errors = errors;
                return true;
            }

            component.errors.clear();
            component.is_submitting = true;

            let link = ctx.link().clone();
            let user_id = ctx.props().user_id.clone();
            let draft = component.draft.clone();
            let logo_file = component.logo_file.clone();
            spawn_local(async move {
                let result = api::create_survey(&user_id, &draft, logo_file.as_ref()).await;
                link.send_message(Msg::SubmitFinished(result));
            });
            true
        }
        Msg::SubmitFinished(result) => {
            component.is_submitting = false;
            match result {
                Ok(survey) => {
                    gloo_console::log!(format!("survey {} created", survey.short_code));
                    show_toast("Survey created.");
                    ctx.props().on_done.emit(());
                }
                Err(ApiError::Validation(errors)) => {
                    component.errors = errors;
                }
                Err(err) => {
                    gloo_console::error!(format!("creating survey failed: {}", err));
                    show_toast(&format!("Could not create the survey. {}", err));
                }
            }
            true
        }
        Msg::Cancel => {
            ctx.props().on_done.emit(());
            false
        }
    }
}

/// Adds `id` to the selection, or removes it if already selected. Order of
/// selection is kept.
pub fn toggle_selection(selected: &mut Vec<String>, id: String) {
    if let Some(position) = selected.iter().position(|s| *s == id) {
        selected.remove(position);
    } else {
        selected.push(id);
    }
}

/// Keeps the catalog in the order the server lists it: by name.
fn insert_by_name(products: &mut Vec<Product>, product: Product) {
    let position = products
        .iter()
        .position(|p| p.product_name > product.product_name)
        .unwrap_or(products.len());
    products.insert(position, product);
}
