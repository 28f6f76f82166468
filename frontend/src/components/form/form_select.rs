use common::model::enums::EnumOption;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct FormSelectProps {
    pub id: AttrValue,
    pub label: AttrValue,
    pub value: AttrValue,
    pub options: Vec<EnumOption>,
    #[prop_or(AttrValue::Static("Select an option"))]
    pub placeholder: AttrValue,
    #[prop_or_default]
    pub error: Option<AttrValue>,
    pub onchange: Callback<String>,
}

/// A `<select>` over enumeration options. The empty placeholder entry maps to
/// an empty value, which the draft rules report as missing.
#[function_component(FormSelect)]
pub fn form_select(props: &FormSelectProps) -> Html {
    let onchange = props.onchange.reform(|e: Event| {
        let select: web_sys::HtmlSelectElement = e.target_unchecked_into();
        select.value()
    });

    html! {
        <div class={classes!("form-field", props.error.is_some().then_some("has-error"))}>
            <label for={props.id.clone()}>{ props.label.clone() }</label>
            <select id={props.id.clone()} {onchange}>
                <option value="" selected={props.value.is_empty()}>{ props.placeholder.clone() }</option>
                { for props.options.iter().map(|option| html! {
                    <option
                        value={option.value.clone()}
                        selected={*props.value == *option.value}
                    >
                        { option.label.clone() }
                    </option>
                }) }
            </select>
            if let Some(error) = &props.error {
                <p class="field-error">{ error.clone() }</p>
            }
        </div>
    }
}
