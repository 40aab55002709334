use crate::constants::{START_PROMPT_ID, START_PROMPT_STYLE, START_PROMPT_TEXT};
use web_sys as web;

/// Show the "Click to Start" prompt, reusing one already on the page.
pub fn show_start_prompt(document: &web::Document) -> anyhow::Result<web::Element> {
    if let Some(el) = document.get_element_by_id(START_PROMPT_ID) {
        return Ok(el);
    }
    let el = document
        .create_element("div")
        .map_err(|e| anyhow::anyhow!("create prompt: {:?}", e))?;
    el.set_id(START_PROMPT_ID);
    el.set_text_content(Some(START_PROMPT_TEXT));
    _ = el.set_attribute("style", START_PROMPT_STYLE);
    let body = document
        .body()
        .ok_or_else(|| anyhow::anyhow!("document has no body"))?;
    body.append_child(&el)
        .map_err(|e| anyhow::anyhow!("append prompt: {:?}", e))?;
    Ok(el)
}

#[inline]
pub fn remove_start_prompt(prompt: &web::Element) {
    prompt.remove();
}
