use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct FormInputProps {
    pub id: AttrValue,
    pub label: AttrValue,
    pub value: AttrValue,
    #[prop_or_default]
    pub placeholder: AttrValue,
    #[prop_or_default]
    pub error: Option<AttrValue>,
    pub oninput: Callback<String>,
}

#[function_component(FormInput)]
pub fn form_input(props: &FormInputProps) -> Html {
    let oninput = props.oninput.reform(|e: InputEvent| {
        let input: web_sys::HtmlInputElement = e.target_unchecked_into();
        input.value()
    });

    html! {
        <div class={classes!("form-field", props.error.is_some().then_some("has-error"))}>
            <label for={props.id.clone()}>{ props.label.clone() }</label>
            <input
                id={props.id.clone()}
                type="text"
                value={props.value.clone()}
                placeholder={props.placeholder.clone()}
                {oninput}
            />
            if let Some(error) = &props.error {
                <p class="field-error">{ error.clone() }</p>
            }
        </div>
    }
}
