//! Projections of the document onto the surface.
//!
//! Every renderer replaces one region wholesale. List regions get the reorder
//! adapter re-attached right after, since the old binding went away with the
//! old elements.

use crate::document::{Configuration, DefaultList, Model, ModelRef};
use crate::editor::actions::Section;
use crate::editor::form::{EditTarget, ProviderRow};
use crate::editor::modal::GuidedModal;
use crate::editor::notification::Notification;
use crate::editor::reorder::{self, ReorderableList};
use crate::editor::state::{EditorSession, FormSession};
use crate::editor::surface::{Region, RegionId, RegionItem, Surface};
use crate::shared::escape::{escape_html, escape_optional};

const NO_MODELS: &str = "No models configured";
const NO_PROVIDERS: &str = "No providers configured";
const NO_SELECTION: &str = "No models selected";

fn empty_state(message: &str) -> String {
    format!(r#"<div class="empty-state"><p>{message}</p></div>"#)
}

fn attach(surface: &mut Surface, list: ReorderableList) {
    if let Err(err) = reorder::attach(surface, list) {
        tracing::warn!(list = %list, error = %err, "failed to attach reorder adapter");
    }
}

/// Redraws the named sections from the session. Document sections are left
/// alone while nothing is loaded.
pub fn render_sections(session: &EditorSession, sections: &[Section], surface: &mut Surface) {
    for section in sections {
        render_section(session, *section, surface);
    }
}

pub fn render_section(session: &EditorSession, section: Section, surface: &mut Surface) {
    match (section, session.config()) {
        (Section::Models, Some(config)) => render_models(config, surface),
        (Section::Providers, Some(config)) => render_providers(config, surface),
        (Section::Defaults(list), Some(config)) => render_default_list(config, list, surface),
        (Section::Version, Some(config)) => render_version(config, surface),
        (Section::ModelForm, _) => match session.form() {
            Some(form) => render_model_form(form, surface),
            None => {
                surface.remove(RegionId::ModelForm);
            }
        },
        (Section::Modal, _) => match session.modal() {
            Some(modal) => render_modal(modal, surface),
            None => {
                surface.remove(RegionId::Modal);
            }
        },
        (_, None) => {}
    }
}

pub fn render_models(config: &Configuration, surface: &mut Surface) {
    let items = config
        .models
        .iter()
        .enumerate()
        .map(|(index, model)| RegionItem::new(index.to_string(), model_card(index, model)))
        .collect();
    surface.replace(
        RegionId::ModelsList,
        Region::list(items, empty_state(NO_MODELS)),
    );
    attach(surface, ReorderableList::Models);
}

pub fn model_card(index: usize, model: &Model) -> String {
    let tags: String = model
        .enabled_capabilities()
        .into_iter()
        .map(|capability| match capability.tag_class() {
            Some(class) => format!(
                r#"<span class="feature-tag {class}">{}</span>"#,
                capability.label()
            ),
            None => format!(r#"<span class="feature-tag">{}</span>"#, capability.label()),
        })
        .collect();
    let providers = model
        .provider_names()
        .into_iter()
        .map(escape_html)
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        concat!(
            r#"<div class="model-card" data-action="edit-model" data-index="{index}">"#,
            r#"<div class="model-header"><div class="model-name">{name}</div>"#,
            r#"<div class="model-command">/{command}</div></div>"#,
            r#"<div class="model-features">{tags}</div>"#,
            r#"<div class="model-providers">Providers: {providers}</div>"#,
            "</div>"
        ),
        index = index,
        name = escape_html(&model.name),
        command = escape_html(&model.command),
        tags = tags,
        providers = providers,
    )
}

pub fn render_providers(config: &Configuration, surface: &mut Surface) {
    let items = config
        .providers_order
        .iter()
        .map(|provider| {
            let name = escape_html(provider);
            RegionItem::new(
                provider.clone(),
                format!(
                    concat!(
                        r#"<li class="sortable-item"><span>{name}</span>"#,
                        r#"<button type="button" class="remove-item" data-action="remove-provider" data-name="{name}">Remove</button>"#,
                        "</li>"
                    ),
                    name = name
                ),
            )
        })
        .collect();
    surface.replace(
        RegionId::ProvidersList,
        Region::list(items, empty_state(NO_PROVIDERS)),
    );
    attach(surface, ReorderableList::Providers);
}

pub fn render_default_list(config: &Configuration, list: DefaultList, surface: &mut Surface) {
    let items = config
        .resolve_list(list)
        .into_iter()
        .map(|entry| RegionItem::new(entry.name(), default_list_row(list, entry)))
        .collect();
    surface.replace(
        RegionId::DefaultList(list),
        Region::list(items, empty_state(NO_SELECTION)),
    );
    attach(surface, ReorderableList::Defaults(list));
}

fn default_list_row(list: DefaultList, entry: ModelRef<'_>) -> String {
    let name = escape_html(entry.name());
    let command = escape_optional(entry.model().map(|model| &model.command));
    let detail = if entry.model().is_some() {
        format!(r#"<span class="model-command">/{command}</span>"#)
    } else {
        String::new()
    };
    format!(
        concat!(
            r#"<div class="sortable-item"><span>{name}</span>{detail}"#,
            r#"<button type="button" class="remove-item" data-action="remove-from-list" data-list="{list}" data-name="{name}">Remove</button>"#,
            "</div>"
        ),
        name = name,
        detail = detail,
        list = list.key(),
    )
}

pub fn render_defaults(config: &Configuration, surface: &mut Surface) {
    for list in crate::document::ALL_DEFAULT_LISTS {
        render_default_list(config, list, surface);
    }
}

pub fn render_version(config: &Configuration, surface: &mut Surface) {
    let value = match config.current_version {
        Some(version) => format!(r#"<span class="version-value">{version}</span>"#),
        None => r#"<span class="version-value version-missing">not set</span>"#.to_string(),
    };
    surface.replace(
        RegionId::Version,
        Region::fragment(format!(
            r#"{value}<button type="button" data-action="edit-version">Edit</button>"#
        )),
    );
}

pub fn render_all(config: &Configuration, surface: &mut Surface) {
    render_models(config, surface);
    render_providers(config, surface);
    render_defaults(config, surface);
    render_version(config, surface);
}

pub fn render_model_form(session: &FormSession, surface: &mut Surface) {
    let form = &session.form;
    let (title, delete_button) = match session.target {
        EditTarget::New => ("Add New Model", String::new()),
        EditTarget::Existing(_) => (
            "Edit Model",
            r#"<button type="button" id="deleteModelBtn" data-action="delete-model">Delete</button>"#
                .to_string(),
        ),
    };
    let checkboxes: String = form
        .capabilities()
        .into_iter()
        .map(|capability| {
            let checked = if form.is_checked(capability) {
                " checked"
            } else {
                ""
            };
            format!(
                r#"<label><input type="checkbox" name="{key}"{checked}> {label}</label>"#,
                key = capability.key(),
                label = capability.label(),
            )
        })
        .collect();
    let rows: String = form.rows().iter().map(provider_row).collect();
    let mut html = String::new();
    html.push_str(&format!(
        r#"<div class="modal" data-revision="{}"><h2 id="modalTitle">{title}</h2><form id="modelForm">"#,
        form.revision.as_str()
    ));
    html.push_str(&format!(
        r#"<input type="text" name="name" value="{}"><input type="text" name="command" value="{}">"#,
        escape_html(&form.name),
        escape_html(&form.command)
    ));
    html.push_str(&checkboxes);
    html.push_str(&format!(
        r#"<input type="text" name="encoding" value="{}">"#,
        escape_html(&form.encoding)
    ));
    html.push_str(&format!(
        r#"<div id="providers-container">{rows}</div><button type="button" data-action="add-provider-row">Add Provider</button>"#
    ));
    html.push_str(&format!(
        r#"</form><button type="button" data-action="save-model">Save</button>{delete_button}<button type="button" data-action="close-model-form">Cancel</button></div>"#
    ));
    surface.replace(RegionId::ModelForm, Region::fragment(html));
}

fn provider_row(row: &ProviderRow) -> String {
    format!(
        concat!(
            r#"<div class="provider-item" data-id="{id}"><div class="provider-header">"#,
            r#"<input type="text" class="provider-name" placeholder="Provider name (e.g., openrouter)" value="{provider}">"#,
            r#"<button type="button" class="remove-provider" data-action="remove-provider-row" data-id="{id}">Remove</button></div>"#,
            r#"<input type="text" class="codenames-input" placeholder="Codenames (comma-separated)" value="{codenames}">"#,
            "</div>"
        ),
        id = row.id,
        provider = escape_html(&row.provider),
        codenames = escape_html(&row.codenames),
    )
}

pub fn render_modal(modal: &GuidedModal, surface: &mut Surface) {
    let body = match modal {
        GuidedModal::AddProvider => {
            r#"<input type="text" name="provider" placeholder="Provider name">"#.to_string()
        }
        GuidedModal::AddToList { options, .. } if options.is_empty() => {
            empty_state("No models available to add")
        }
        GuidedModal::AddToList { list, options } => {
            let choices: String = options
                .iter()
                .map(|name| {
                    let name = escape_html(name);
                    format!(r#"<option value="{name}">{name}</option>"#)
                })
                .collect();
            format!(r#"<select name="model" data-list="{}">{choices}</select>"#, list.key())
        }
        GuidedModal::EditVersion { current } => format!(
            r#"<input type="number" name="version" min="1" value="{}">"#,
            current.unwrap_or(1)
        ),
    };
    surface.replace(
        RegionId::Modal,
        Region::fragment(format!(
            concat!(
                r#"<div class="modal guided-modal" data-kind="{kind}"><h3>{title}</h3>{body}"#,
                r#"<button type="button" data-action="submit-modal">Save</button>"#,
                r#"<button type="button" data-action="close-modal">Cancel</button></div>"#
            ),
            kind = modal.kind(),
            title = escape_html(&modal.title()),
            body = body,
        )),
    );
}

pub fn render_status(notification: Option<&Notification>, surface: &mut Surface) {
    match notification {
        Some(notification) => surface.replace(
            RegionId::Status,
            Region::fragment(format!(
                r#"<div class="{}">{}</div>"#,
                notification.css_class(),
                escape_html(&notification.message)
            )),
        ),
        None => {
            surface.remove(RegionId::Status);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::SchemaRevision;
    use crate::editor::form::ModelForm;

    #[test]
    fn model_card_lists_tags_and_providers() {
        let mut model = Model::new("GPT <4o>", "gpt")
            .with_provider("openrouter", &["openai/gpt-4o"])
            .with_provider("github", &["gpt-4o"]);
        model.vision = Some(true);
        model.is_markov = Some(true);
        model.reasoning = Some(false);

        let card = model_card(2, &model);

        assert!(card.contains(r#"data-index="2""#));
        assert!(card.contains("GPT &lt;4o&gt;"));
        assert!(card.contains(r#"<div class="model-command">/gpt</div>"#));
        assert!(card.contains(r#"<span class="feature-tag vision">Vision</span>"#));
        assert!(card.contains(r#"<span class="feature-tag">Markov</span>"#));
        assert!(!card.contains("Reasoning"));
        assert!(card.contains("Providers: github, openrouter"));
    }

    #[test]
    fn dangling_default_entry_renders_without_command() {
        let config = Configuration {
            models: vec![Model::new("GPT", "gpt")],
            default_models: vec!["GPT".to_string(), "Ghost".to_string()],
            ..Configuration::default()
        };
        let mut surface = Surface::new();

        render_default_list(&config, DefaultList::General, &mut surface);

        let region = surface
            .region(RegionId::DefaultList(DefaultList::General))
            .expect("region");
        assert_eq!(region.item_ids(), vec!["GPT", "Ghost"]);
        assert!(region.items()[0].html.contains("/gpt"));
        assert!(!region.items()[1].html.contains("model-command"));
        assert_eq!(
            region.sortable().and_then(|options| options.group),
            Some("default-models")
        );
    }

    #[test]
    fn empty_sections_render_empty_state_markers() {
        let mut surface = Surface::new();
        render_all(&Configuration::default(), &mut surface);

        assert_eq!(
            surface.html(RegionId::ModelsList).as_deref(),
            Some(r#"<div class="empty-state"><p>No models configured</p></div>"#)
        );
        assert!(surface
            .html(RegionId::ProvidersList)
            .expect("providers")
            .contains(NO_PROVIDERS));
        assert!(surface
            .html(RegionId::DefaultList(DefaultList::Vision))
            .expect("vision")
            .contains(NO_SELECTION));
        assert!(surface
            .html(RegionId::Version)
            .expect("version")
            .contains("not set"));
    }

    #[test]
    fn rerendering_keeps_regions_sortable() {
        let config = Configuration {
            providers_order: vec!["a".to_string()],
            ..Configuration::default()
        };
        let mut surface = Surface::new();
        render_providers(&config, &mut surface);
        render_providers(&config, &mut surface);
        assert!(surface
            .region(RegionId::ProvidersList)
            .and_then(Region::sortable)
            .is_some());
    }

    #[test]
    fn model_form_shows_delete_only_when_editing() {
        let mut model = Model::new("GPT", "gpt").with_provider("groq", &["a", "b"]);
        model.vision = Some(true);
        let mut surface = Surface::new();

        render_model_form(
            &FormSession {
                target: EditTarget::Existing(0),
                form: ModelForm::populated(&model, SchemaRevision::Versioned),
            },
            &mut surface,
        );
        let html = surface.html(RegionId::ModelForm).expect("form");
        assert!(html.contains("Edit Model"));
        assert!(html.contains("deleteModelBtn"));
        assert!(html.contains(r#"name="vision" checked"#));
        assert!(html.contains(r#"name="is_llama">"#));
        assert!(html.contains(r#"value="a, b""#));

        render_model_form(
            &FormSession {
                target: EditTarget::New,
                form: ModelForm::blank(SchemaRevision::Legacy),
            },
            &mut surface,
        );
        let html = surface.html(RegionId::ModelForm).expect("form");
        assert!(html.contains("Add New Model"));
        assert!(!html.contains("deleteModelBtn"));
        assert!(!html.contains("is_llama"));
    }

    #[test]
    fn add_to_list_modal_renders_options_or_empty_state() {
        let mut surface = Surface::new();
        render_modal(
            &GuidedModal::AddToList {
                list: DefaultList::Narrator,
                options: vec!["A&B".to_string()],
            },
            &mut surface,
        );
        let html = surface.html(RegionId::Modal).expect("modal");
        assert!(html.contains(r#"<option value="A&amp;B">A&amp;B</option>"#));
        assert!(html.contains("Add Model to Narrator Models"));

        render_modal(
            &GuidedModal::AddToList {
                list: DefaultList::Narrator,
                options: Vec::new(),
            },
            &mut surface,
        );
        assert!(surface
            .html(RegionId::Modal)
            .expect("modal")
            .contains("No models available to add"));
    }
}
