use shared_types::validation::is_http_url;
use shared_types::{Company, Job};

use crate::compose::{
    careers_path, page_header, ComposedPage, JobBoard, JobCard, PageHeader, RenderedSection,
};
use crate::richtext::sanitize;
use crate::theme::HeroBackground;
use crate::video::VideoSource;

const BASE_STYLE: &str = "body{margin:0;color:#0f172a;background:#fff}\
header{display:flex;align-items:center;justify-content:space-between;padding:0 1rem;height:4rem;border-bottom:1px solid #e2e8f0}\
header img{height:2rem}\
main section{padding:4rem 1rem}\
.container{max-width:64rem;margin:0 auto}\
.hero{position:relative;text-align:center;background-size:cover;background-position:center}\
.scrim{position:absolute;inset:0;background:#000}\
.hero .container{position:relative}\
.video{aspect-ratio:16/9;background:#000;color:#fff;display:flex;align-items:center;justify-content:center}\
.video iframe,.video video{width:100%;height:100%;border:0}\
.job-card{border:1px solid #e2e8f0;border-radius:.5rem;padding:1rem;margin-bottom:1rem}\
.tag{display:inline-block;padding:.25rem .5rem;margin-right:.5rem;border-radius:.375rem;background:#f1f5f9;font-size:.75rem}\
.button{display:inline-block;padding:.5rem 1rem;border-radius:.375rem;color:#fff;text-decoration:none}\
footer{border-top:1px solid #e2e8f0;padding:2rem 1rem;text-align:center;font-size:.875rem;color:#64748b}";

/// Escapes text for use in element content and quoted attribute values.
pub fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

pub fn render_careers_page(page: &ComposedPage) -> String {
    let header = &page.header;
    let mut body = render_header(header, "/", "Back to Home");

    body.push_str("<main>");
    for section in &page.sections {
        body.push_str(&render_section(section, header));
    }
    body.push_str("</main>");
    body.push_str(&render_footer(page.copyright_year, &header.company_name));

    document(
        &format!("{} Careers", header.company_name),
        &header.font_stack,
        &body,
    )
}

/// Job detail page. The description is sanitized again before output.
pub fn render_job_detail(company: &Company, job: &Job, copyright_year: i32) -> String {
    let header = page_header(company);
    let primary = escape_html(&header.primary_color);
    let mut body = render_header(&header, &careers_path(&company.slug), "Back to Jobs");

    body.push_str("<main><section><div class=\"container\">");
    body.push_str(&format!(
        "<h1 style=\"color:{}\">{}</h1>",
        primary,
        escape_html(&job.title)
    ));
    body.push_str(&format!(
        "<p class=\"meta\"><span>{}</span> · <span>{} ({})</span> · <span>{}</span> · <span>Posted {} days ago</span></p>",
        escape_html(&job.department),
        escape_html(&job.location),
        job.work_policy,
        job.employment_type,
        job.posted_days_ago
    ));

    let apply = job
        .application_url
        .as_deref()
        .filter(|url| is_http_url(url))
        .map(|url| {
            format!(
                "<p><a class=\"button\" style=\"background:{}\" href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">Apply for this Job</a></p>",
                primary,
                escape_html(url)
            )
        })
        .unwrap_or_default();
    body.push_str(&apply);

    body.push_str("<hr><h3>About the Role</h3>");
    body.push_str(&format!("<div class=\"description\">{}</div>", sanitize(&job.description)));

    body.push_str("<h3>Details</h3><ul>");
    body.push_str(&format!(
        "<li>{} level experience required.</li>",
        job.experience_level
    ));
    body.push_str(&format!("<li>{} position.</li>", job.job_type));
    if let Some(salary) = job.salary_range.as_deref().filter(|s| !s.trim().is_empty()) {
        body.push_str(&format!("<li>Salary: {}</li>", escape_html(salary)));
    }
    body.push_str("</ul>");
    body.push_str(&apply);
    body.push_str("</div></section></main>");
    body.push_str(&render_footer(copyright_year, &company.name));

    document(
        &format!("{} at {}", job.title, company.name),
        &header.font_stack,
        &body,
    )
}

pub fn render_not_found(message: &str) -> String {
    let body = format!(
        "<main><section><div class=\"container\" style=\"text-align:center\"><h1>Page not found</h1><p>{}</p></div></section></main>",
        escape_html(message)
    );
    document("Not found", "system-ui, sans-serif", &body)
}

fn document(title: &str, font_stack: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html><html lang=\"en\"><head><meta charset=\"utf-8\">\
<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\
<title>{}</title><style>{}</style></head><body style=\"font-family:{}\">{}</body></html>",
        escape_html(title),
        BASE_STYLE,
        escape_html(font_stack),
        body
    )
}

fn render_header(header: &PageHeader, back_href: &str, back_label: &str) -> String {
    let logo = header
        .logo_url
        .as_deref()
        .map(|url| {
            format!(
                "<img src=\"{}\" alt=\"{} Logo\">",
                escape_html(url),
                escape_html(&header.company_name)
            )
        })
        .unwrap_or_default();

    format!(
        "<header><div>{}<strong>{} Careers</strong></div><a href=\"{}\">{}</a></header>",
        logo,
        escape_html(&header.company_name),
        escape_html(back_href),
        back_label
    )
}

fn render_footer(year: i32, company_name: &str) -> String {
    format!(
        "<footer>&copy; {} {}. All rights reserved.</footer>",
        year,
        escape_html(company_name)
    )
}

fn render_section(section: &RenderedSection, header: &PageHeader) -> String {
    match section {
        RenderedSection::Hero {
            title,
            subtitle,
            theme,
            ..
        } => {
            let (background, scrim) = match &theme.background {
                HeroBackground::Image { url, scrim_opacity } => (
                    format!("background-image:url('{}')", escape_html(url)),
                    format!("<div class=\"scrim\" style=\"opacity:{}\"></div>", scrim_opacity),
                ),
                HeroBackground::Gradient { tint } => (
                    format!(
                        "background-image:linear-gradient(to bottom, {}, transparent)",
                        escape_html(tint)
                    ),
                    String::new(),
                ),
            };
            let subtitle_style = theme
                .subtitle_color
                .as_deref()
                .map(|color| format!(" style=\"color:{}\"", escape_html(color)))
                .unwrap_or_default();
            let logo = header
                .logo_url
                .as_deref()
                .map(|url| {
                    format!(
                        "<img src=\"{}\" alt=\"{} Logo\" style=\"height:5rem\">",
                        escape_html(url),
                        escape_html(&header.company_name)
                    )
                })
                .unwrap_or_default();

            format!(
                "<section class=\"hero\" style=\"{}\">{}<div class=\"container\">{}\
<h1 style=\"color:{}\">{}</h1><p{}>{}</p>\
<a class=\"button\" href=\"#jobs\" style=\"background:{}\">Learn More</a></div></section>",
                background,
                scrim,
                logo,
                escape_html(&theme.title_color),
                escape_html(title),
                subtitle_style,
                escape_html(subtitle),
                escape_html(&theme.button_color)
            )
        }
        RenderedSection::About { title, content, .. } => format!(
            "<section class=\"about\"><div class=\"container\" style=\"text-align:center\"><h2>{}</h2><p>{}</p></div></section>",
            escape_html(title),
            escape_html(content)
        ),
        RenderedSection::Video { title, video, .. } => {
            let player = match video {
                Some(VideoSource::Uploaded(url)) => {
                    format!("<video src=\"{}\" controls playsinline></video>", escape_html(url))
                }
                Some(VideoSource::Embed(url)) => format!(
                    "<iframe src=\"{}\" allow=\"accelerometer; autoplay; clipboard-write; encrypted-media; gyroscope; picture-in-picture\" allowfullscreen></iframe>",
                    escape_html(url)
                ),
                None => "<div><p>No video added yet</p>\
<p>Add a YouTube/Vimeo URL or upload a video in the editor</p></div>"
                    .to_string(),
            };
            format!(
                "<section><div class=\"container\"><h2 style=\"text-align:center\">{}</h2><div class=\"video\">{}</div></div></section>",
                escape_html(title),
                player
            )
        }
        RenderedSection::Jobs { title, board, .. } => format!(
            "<section id=\"jobs\"><div class=\"container\"><h2 style=\"text-align:center\">{}</h2>{}</div></section>",
            escape_html(title),
            render_job_board(board, header)
        ),
    }
}

fn render_job_board(board: &JobBoard, header: &PageHeader) -> String {
    let mut html = String::from("<form class=\"job-filter\" method=\"get\" action=\"#jobs\">");
    html.push_str(&format!(
        "<input type=\"search\" name=\"q\" placeholder=\"Search jobs...\" value=\"{}\">",
        escape_html(&board.query.search)
    ));
    html.push_str(&render_select("location", &board.location_options, &board.query.location));
    html.push_str(&render_select(
        "type",
        &board.employment_type_options,
        &board.query.employment_type,
    ));
    html.push_str("<button type=\"submit\">Filter</button></form>");

    if board.jobs.is_empty() {
        html.push_str("<p style=\"text-align:center\">No jobs found matching your criteria.</p>");
        return html;
    }

    for card in &board.jobs {
        html.push_str(&render_job_card(card, header));
    }
    html
}

fn render_select(name: &str, options: &[String], selected: &str) -> String {
    let mut html = format!("<select name=\"{}\">", name);
    for option in options {
        let marker = if option == selected { " selected" } else { "" };
        html.push_str(&format!(
            "<option value=\"{0}\"{1}>{0}</option>",
            escape_html(option),
            marker
        ));
    }
    html.push_str("</select>");
    html
}

fn render_job_card(card: &JobCard, header: &PageHeader) -> String {
    let primary = escape_html(&header.primary_color);
    let salary = card
        .salary_range
        .as_deref()
        .map(|s| format!("<span class=\"tag\">{}</span>", escape_html(s)))
        .unwrap_or_default();

    format!(
        "<article class=\"job-card\">\
<h3><a href=\"{path}\" style=\"color:{primary}\">{title}</a></h3>\
<p>{department} · {location} ({policy})</p>\
<p><span class=\"tag\">{employment}</span><span class=\"tag\">{level}</span>{salary}</p>\
<p>{excerpt}</p>\
<p><small>Posted {days} days ago</small> <a class=\"button\" href=\"{path}\" style=\"background:{primary}\">View Details</a></p>\
</article>",
        path = escape_html(&card.detail_path),
        primary = primary,
        title = escape_html(&card.title),
        department = escape_html(&card.department),
        location = escape_html(&card.location),
        policy = escape_html(&card.work_policy),
        employment = escape_html(&card.employment_type),
        level = escape_html(&card.experience_level),
        salary = salary,
        excerpt = escape_html(&card.excerpt),
        days = card.posted_days_ago,
    )
}
