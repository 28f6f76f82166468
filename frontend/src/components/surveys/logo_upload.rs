use crate::helpers::format_kb;
use common::model::survey::MAX_LOGO_BYTES;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct LogoUploadProps {
    /// Object URL of the picked file, used as the preview source.
    pub preview: Option<AttrValue>,
    pub file_name: Option<AttrValue>,
    pub size: Option<usize>,
    #[prop_or_default]
    pub error: Option<AttrValue>,
    pub on_select: Callback<web_sys::File>,
    pub on_clear: Callback<()>,
}

#[function_component(LogoUpload)]
pub fn logo_upload(props: &LogoUploadProps) -> Html {
    let input_ref = use_node_ref();

    let onchange = {
        let on_select = props.on_select.clone();
        Callback::from(move |e: Event| {
            let input: web_sys::HtmlInputElement = e.target_unchecked_into();
            if let Some(file) = input.files().and_then(|files| files.get(0)) {
                on_select.emit(file);
            }
        })
    };

    let onclear = {
        let on_clear = props.on_clear.clone();
        let input_ref = input_ref.clone();
        Callback::from(move |_: MouseEvent| {
            // Reset the input so picking the same file again fires `change`.
            if let Some(input) = input_ref.cast::<web_sys::HtmlInputElement>() {
                input.set_value("");
            }
            on_clear.emit(());
        })
    };

    html! {
        <div class={classes!("form-field", "logo-upload", props.error.is_some().then_some("has-error"))}>
            <label for="survey-logo">{"Logo"}</label>
            <input
                id="survey-logo"
                ref={input_ref}
                type="file"
                accept="image/*"
                {onchange}
            />
            <p class="hint">{ format!("Optional, up to {}", format_kb(MAX_LOGO_BYTES)) }</p>
            if let Some(preview) = &props.preview {
                <div class="logo-preview">
                    <img src={preview.clone()} alt="Logo preview" />
                    <div class="logo-meta">
                        if let Some(name) = &props.file_name {
                            <span class="logo-name">{ name.clone() }</span>
                        }
                        if let Some(size) = props.size {
                            <span class="logo-size">{ format_kb(size) }</span>
                        }
                        <button type="button" class="link-button" onclick={onclear}>{"Remove"}</button>
                    </div>
                </div>
            }
            if let Some(error) = &props.error {
                <p class="field-error">{ error.clone() }</p>
            }
        </div>
    }
}
