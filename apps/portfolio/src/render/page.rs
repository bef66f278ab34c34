use chrono::{Datelike, NaiveDate, Utc};

use crate::contact::form::{ContactField, ContactFormState, SubmissionStatus};
use crate::content::partition::SkillGroup;
use crate::content::sections::{ContactLine, Page, Section, SectionBody};
use crate::models::cv::{Experience, PersonalInfo, Project};
use crate::render::escape_html as esc;
use crate::theme::Theme;

const CONTACT_BLURB: &str = "Sunt mereu deschis pentru a discuta proiecte noi, idei creative \
sau oportunități de a face parte din viziunile tale.";

/// Renders the whole document. The `<html>` element carries the `dark` class
/// only in dark mode; that class is the one signal the stylesheet keys off.
pub fn render_page(
    page: &Page<'_>,
    theme: Theme,
    form_id: &str,
    form: &ContactFormState,
) -> String {
    let root_class = if theme.is_dark() { " class=\"dark\"" } else { "" };
    let person = page.personal;

    let mut body = String::new();
    body.push_str(&navbar(page, theme));
    body.push_str("<main>");
    body.push_str(&hero(person));
    for section in &page.sections {
        body.push_str(&section_html(section, form_id, form));
    }
    body.push_str("</main>");
    body.push_str(&format!(
        "<footer><p>&copy; {} {}.</p></footer>",
        Utc::now().year(),
        esc(&person.name)
    ));

    format!(
        "<!DOCTYPE html>\n<html lang=\"ro\"{root_class} data-theme=\"{theme}\">\
         <head><meta charset=\"utf-8\">\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\
         <title>{name} | {title}</title></head><body>{body}</body></html>",
        theme = theme.as_str(),
        name = esc(&person.name),
        title = esc(&person.title),
    )
}

fn navbar(page: &Page<'_>, theme: Theme) -> String {
    let links: String = page
        .sections
        .iter()
        .map(|s| format!("<a href=\"#{}\">{}</a>", s.anchor(), esc(s.title)))
        .collect();
    let toggle_label = match theme {
        Theme::Dark => "Mod luminos",
        Theme::Light => "Mod întunecat",
    };
    format!(
        "<nav><a class=\"brand\" href=\"#top\">{}</a>{links}\
         <form method=\"post\" action=\"/theme/toggle\">\
         <button type=\"submit\" class=\"theme-toggle\" aria-pressed=\"{}\">{toggle_label}</button>\
         </form></nav>",
        esc(&page.personal.name),
        theme.is_dark(),
    )
}

fn hero(person: &PersonalInfo) -> String {
    format!(
        "<header id=\"top\" class=\"hero\"><h1>{}</h1><p class=\"hero-title\">{}</p>\
         <p class=\"hero-summary\">{}</p><p class=\"hero-location\">{}</p></header>",
        esc(&person.name),
        esc(&person.title),
        esc(&person.summary),
        esc(&person.location),
    )
}

fn section_html(section: &Section<'_>, form_id: &str, form: &ContactFormState) -> String {
    let content = match &section.body {
        SectionBody::Experience(items) => items
            .iter()
            .enumerate()
            .map(|(key, exp)| experience_item(key, exp))
            .collect::<String>(),
        SectionBody::Skills(groups) => groups
            .iter()
            .enumerate()
            .map(|(key, group)| skill_group(key, group))
            .collect(),
        SectionBody::Projects(items) => items
            .iter()
            .enumerate()
            .map(|(key, project)| project_card(key, project))
            .collect(),
        SectionBody::Contact(lines) => contact_block(lines, form_id, form),
    };
    format!(
        "<section id=\"{}\" data-count=\"{}\"><h2>{}</h2>\
         <div class=\"section-body\">{content}</div></section>",
        section.anchor(),
        section.item_count(),
        esc(section.title),
    )
}

fn format_month(date: NaiveDate) -> String {
    date.format("%m/%Y").to_string()
}

fn experience_item(key: usize, exp: &Experience) -> String {
    let end = exp
        .date_end
        .map(format_month)
        .unwrap_or_else(|| "Prezent".to_string());
    let achievements = if exp.achievements.is_empty() {
        String::new()
    } else {
        let items: String = exp
            .achievements
            .iter()
            .map(|a| format!("<li>{}</li>", esc(a)))
            .collect();
        format!("<ul class=\"achievements\">{items}</ul>")
    };
    format!(
        "<article class=\"timeline-item\" data-key=\"{key}\"><h3>{}</h3>\
         <p class=\"company\">{}</p><p class=\"period\">{} &ndash; {}</p>\
         <p>{}</p>{achievements}</article>",
        esc(&exp.role),
        esc(&exp.company),
        format_month(exp.date_start),
        end,
        esc(&exp.description),
    )
}

fn skill_group(key: usize, group: &SkillGroup<'_>) -> String {
    let badges: String = group
        .skills
        .iter()
        .enumerate()
        .map(|(i, s)| format!("<span class=\"badge\" data-key=\"{i}\">{}</span>", esc(&s.name)))
        .collect();
    let label = group.category.label();
    let empty = if group.is_empty() { " empty" } else { "" };
    format!(
        "<div class=\"skill-group{empty}\" data-key=\"{key}\" data-category=\"{label}\">\
         <h3>{label}</h3><div class=\"badges\">{badges}</div></div>"
    )
}

fn project_card(key: usize, project: &Project) -> String {
    let tags: String = project
        .tags
        .iter()
        .map(|t| format!("<li>{}</li>", esc(t)))
        .collect();
    let mut links = String::new();
    if let Some(repo) = &project.links.repository {
        links.push_str(&format!("<a href=\"{}\" rel=\"noopener\">Cod sursă</a>", esc(repo)));
    }
    if let Some(live) = &project.links.live {
        links.push_str(&format!("<a href=\"{}\" rel=\"noopener\">Demo</a>", esc(live)));
    }
    format!(
        "<article class=\"project-card\" data-key=\"{key}\"><h3>{}</h3><p>{}</p>\
         <ul class=\"tags\">{tags}</ul><div class=\"links\">{links}</div></article>",
        esc(&project.title),
        esc(&project.description),
    )
}

fn contact_block(lines: &[ContactLine<'_>], form_id: &str, form: &ContactFormState) -> String {
    let info: String = lines
        .iter()
        .enumerate()
        .map(|(key, line)| {
            format!(
                "<div class=\"contact-line\" data-key=\"{key}\">\
                 <p class=\"label\">{}</p><p>{}</p></div>",
                esc(line.label),
                esc(line.value)
            )
        })
        .collect();
    format!(
        "<div class=\"contact-info\"><p>{}</p>{info}</div>{}",
        esc(CONTACT_BLURB),
        contact_form(form_id, form)
    )
}

fn contact_form(form_id: &str, form: &ContactFormState) -> String {
    let fields: String = ContactField::ALL
        .iter()
        .map(|&field| {
            let name = field.as_str();
            let value = esc(form.value(field));
            let input = match field {
                ContactField::Message => format!(
                    "<textarea id=\"contact-{name}\" name=\"{name}\" rows=\"5\">{value}</textarea>"
                ),
                ContactField::Email => format!(
                    "<input id=\"contact-{name}\" type=\"email\" name=\"{name}\" value=\"{value}\">"
                ),
                ContactField::Name => format!(
                    "<input id=\"contact-{name}\" type=\"text\" name=\"{name}\" value=\"{value}\">"
                ),
            };
            let error = form
                .error(field)
                .map(|e| {
                    format!(
                        "<p class=\"field-error\" data-field=\"{name}\">{}</p>",
                        esc(e.message())
                    )
                })
                .unwrap_or_default();
            format!(
                "<div class=\"field\"><label for=\"contact-{name}\">{}</label>{input}{error}</div>",
                field.label()
            )
        })
        .collect();

    let (status_html, disabled) = match form.status() {
        SubmissionStatus::Idle => (String::new(), ""),
        SubmissionStatus::Submitting => (
            "<p class=\"form-status\" data-status=\"submitting\">Se trimite...</p>".to_string(),
            " disabled",
        ),
        SubmissionStatus::Succeeded => (
            "<p class=\"form-status\" data-status=\"succeeded\">\
             Mesajul a fost trimis. Mulțumesc!</p>"
                .to_string(),
            "",
        ),
        SubmissionStatus::Failed(reason) => (
            format!(
                "<p class=\"form-status\" data-status=\"failed\">\
                 Mesajul nu a putut fi trimis: {}</p>",
                esc(reason)
            ),
            "",
        ),
    };

    format!(
        "<form class=\"contact-form\" method=\"post\" action=\"/contact#contact\">\
         <input type=\"hidden\" name=\"form_id\" value=\"{}\">\
         {fields}{status_html}<button type=\"submit\"{disabled}>Trimite</button></form>",
        esc(form_id)
    )
}
