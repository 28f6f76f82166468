use common::model::product::Product;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct ProductGridProps {
    pub products: Vec<Product>,
    pub selected: Vec<String>,
    pub loading: bool,
    /// Set while a product added from the grid is being saved.
    #[prop_or_default]
    pub adding: bool,
    #[prop_or_default]
    pub error: Option<AttrValue>,
    pub on_toggle: Callback<String>,
    /// Receives the name typed into the quick-add row.
    pub on_add: Callback<String>,
}

/// Selectable product cards; clicking a card toggles its id in the selection.
/// A quick-add row below the cards extends the catalog without leaving the form.
#[function_component(ProductGrid)]
pub fn product_grid(props: &ProductGridProps) -> Html {
    let new_name = use_state(String::new);

    let oninput = {
        let new_name = new_name.clone();
        Callback::from(move |e: InputEvent| {
            let input: web_sys::HtmlInputElement = e.target_unchecked_into();
            new_name.set(input.value());
        })
    };

    let onadd = {
        let new_name = new_name.clone();
        let on_add = props.on_add.clone();
        Callback::from(move |_: MouseEvent| {
            let name = new_name.trim().to_string();
            if !name.is_empty() {
                on_add.emit(name);
                new_name.set(String::new());
            }
        })
    };

    let body = if props.loading {
        html! { <div class="spinner" aria-label="Loading products"></div> }
    } else if props.products.is_empty() {
        html! { <p class="notice">{"No products yet. Add one below to attach it to this survey."}</p> }
    } else {
        html! {
            <div class="product-grid">
                { for props.products.iter().map(|product| {
                    let selected = props.selected.contains(&product.id);
                    let onclick = {
                        let id = product.id.clone();
                        props.on_toggle.reform(move |_: MouseEvent| id.clone())
                    };
                    html! {
                        <button
                            type="button"
                            class={classes!("product-card", selected.then_some("selected"))}
                            aria-pressed={selected.to_string()}
                            {onclick}
                        >
                            if let Some(url) = &product.image_url {
                                <img src={url.clone()} alt={product.product_name.clone()} />
                            }
                            <span class="product-name">{ product.product_name.clone() }</span>
                        </button>
                    }
                }) }
            </div>
        }
    };

    html! {
        <div class={classes!("form-field", props.error.is_some().then_some("has-error"))}>
            <label>{"Products"}</label>
            { body }
            <div class="product-add">
                <input
                    type="text"
                    placeholder="New product name"
                    value={(*new_name).clone()}
                    disabled={props.adding}
                    {oninput}
                />
                <button
                    type="button"
                    class="secondary"
                    disabled={props.adding || new_name.trim().is_empty()}
                    onclick={onadd}
                >
                    { if props.adding { "Adding..." } else { "Add product" } }
                </button>
            </div>
            if let Some(error) = &props.error {
                <p class="field-error">{ error.clone() }</p>
            }
        </div>
    }
}
