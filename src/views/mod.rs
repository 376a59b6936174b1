//! Server-rendered HTML pages
//!
//! Pages are assembled from static templates under `html/` by marker
//! replacement. All user-controlled text passes through `html_escape`
//! before insertion, so no user string can carry live marker text into a
//! later replacement.

pub mod relative_time;

pub use relative_time::relative_time;

use chrono::{DateTime, Utc};

use crate::config::IdentityConfig;
use crate::models::{Author, PostWithAuthor, SessionUser};

/// Composer input carried across a failed submission.
#[derive(Debug, Clone, Default)]
pub struct ComposerState {
    pub input: String,
    pub error: Option<String>,
}

fn encode_text(value: &str) -> String {
    html_escape::encode_text(value).into_owned()
}

fn encode_attr(value: &str) -> String {
    html_escape::encode_safe(value).into_owned()
}

fn page(title: &str, content: &str) -> String {
    include_str!("html/page.html")
        .replace("/*style*/", include_str!("html/index.css"))
        .replace("<!--title-->", &encode_text(title))
        .replace("<!--content-->", content)
}

fn avatar_img(url: Option<&str>, class: &str) -> String {
    match url {
        Some(url) => format!(
            r#"<img class="{}" src="{}" alt="Profile image">"#,
            class,
            encode_attr(url)
        ),
        None => String::new(),
    }
}

/// Render one post row: avatar, handle, permalink with relative time,
/// content. Pure; must not panic for any input.
pub fn post_view(row: &PostWithAuthor, now: DateTime<Utc>) -> String {
    include_str!("html/post.html")
        .replace("<!--username-->", &encode_text(&row.author.username))
        .replace("<!--when-->", &relative_time(row.post.created_at, now))
        .replace("<!--content-->", &encode_text(&row.post.content))
        .replace("<!--picture-->", &encode_attr(&row.author.profile_picture))
        .replace(
            "<!--profileUrl-->",
            &encode_attr(&format!("/@{}", row.author.username)),
        )
        .replace(
            "<!--postUrl-->",
            &encode_attr(&format!("/post/{}", row.post.id)),
        )
}

fn composer_html(user: &SessionUser, state: &ComposerState) -> String {
    let error = match &state.error {
        Some(message) => {
            include_str!("html/composer_error.html").replace("<!--message-->", &encode_text(message))
        }
        None => String::new(),
    };

    include_str!("html/composer.html")
        .replace(
            "<!--avatar-->",
            &avatar_img(user.profile_image_url.as_deref(), "avatar avatar-sm"),
        )
        .replace("<!--error-->", &error)
        .replace("<!--value-->", &encode_attr(&state.input))
}

fn header_html(
    session: Option<&SessionUser>,
    composer: &ComposerState,
    identity: &IdentityConfig,
) -> String {
    match session {
        Some(user) => include_str!("html/header_signed_in.html")
            .replace(
                "<!--avatar-->",
                &avatar_img(user.profile_image_url.as_deref(), "avatar avatar-lg"),
            )
            .replace("<!--composer-->", &composer_html(user, composer))
            .replace("<!--name-->", &encode_text(user.display_name()))
            .replace("<!--signOutUrl-->", &encode_attr(&identity.sign_out_url)),
        None => include_str!("html/header_signed_out.html")
            .replace("<!--signInUrl-->", &encode_attr(&identity.sign_in_url)),
    }
}

/// The home page: header strip (sign-in link or greeting + composer)
/// followed by the feed.
///
/// `feed` is `None` when the feed query failed; the page then renders the
/// generic error notice in place of the post list. An empty slice renders
/// an empty feed, not an error.
pub fn home_page(
    session: Option<&SessionUser>,
    feed: Option<&[PostWithAuthor]>,
    composer: &ComposerState,
    identity: &IdentityConfig,
    now: DateTime<Utc>,
) -> String {
    let feed_html = match feed {
        Some(rows) => {
            let posts: String = rows.iter().map(|row| post_view(row, now)).collect();
            format!("<div class=\"feed\">\n{}</div>\n", posts)
        }
        None => include_str!("html/feed_error.html").to_string(),
    };

    let content = format!("{}{}", header_html(session, composer, identity), feed_html);
    page("Chirp", &content)
}

pub fn profile_page(author: &Author) -> String {
    let content =
        include_str!("html/profile.html").replace("<!--username-->", &encode_text(&author.username));
    page("Profile", &content)
}

pub fn permalink_page(row: &PostWithAuthor, now: DateTime<Utc>) -> String {
    page("Chirp", &post_view(row, now))
}

pub fn not_found_page() -> String {
    page("Chirp", include_str!("html/not_found.html"))
}

pub fn error_page() -> String {
    page("Chirp", include_str!("html/feed_error.html"))
}
