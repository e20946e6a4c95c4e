//! Plain-text rendering of the header and the mounted view.

use crate::views::{
    ActiveView, albums::AlbumsView, comments::CommentsView, header::Header, photos::PhotosView,
    posts::PostsView, users::UsersView,
};
use plaza_common::{load::Resource, session::Session};
use std::io::{self, Write};

pub fn render(
    out: &mut impl Write,
    header: &Header,
    session: &Session,
    view: &ActiveView,
) -> io::Result<()> {
    render_header(out, header, session, view)?;
    match view {
        ActiveView::Users(view) => render_users(out, view)?,
        ActiveView::Albums(view) => render_albums(out, view)?,
        ActiveView::Photos(view) => render_photos(out, view)?,
        ActiveView::Posts(view) => render_posts(out, view, session)?,
    }
    writeln!(out)?;
    out.flush()
}

fn render_header(
    out: &mut impl Write,
    header: &Header,
    session: &Session,
    view: &ActiveView,
) -> io::Result<()> {
    writeln!(out, "--- /users  /albums  /photos  /posts --- at {}", view.route())?;
    match session.identity() {
        Some(identity) => writeln!(out, "Logged in as {}", identity.user().name),
        None if !header.username().is_empty() => {
            writeln!(out, "Not logged in ({})", header.username())
        }
        None => writeln!(out, "Not logged in"),
    }
}

/// Prints a placeholder while nothing has been loaded yet. Returns whether it did.
fn render_loading<T>(out: &mut impl Write, resource: &Resource<T>) -> io::Result<bool> {
    if resource.is_loaded() {
        return Ok(false);
    }
    if resource.is_loading() {
        writeln!(out, "Loading {}...", resource.label())?;
    } else {
        writeln!(out, "No {} available.", resource.label())?;
    }
    Ok(true)
}

fn render_users(out: &mut impl Write, view: &UsersView) -> io::Result<()> {
    writeln!(out, "== User List ==")?;
    if !view.filter().query().is_empty() {
        writeln!(out, "search: {:?}", view.filter().query())?;
    }
    if render_loading(out, view.resource())? {
        return Ok(());
    }

    for user in view.visible() {
        writeln!(out, "[{}] {}", user.id, user.name)?;
        writeln!(out, "    Email: {}", user.email)?;
        writeln!(out, "    Address: {}", user.address)?;
    }
    Ok(())
}

fn render_albums(out: &mut impl Write, view: &AlbumsView) -> io::Result<()> {
    match view.owner() {
        Some(user_id) => writeln!(out, "== Albums of user {user_id} ==")?,
        None => writeln!(out, "== Albums ==")?,
    }
    if render_loading(out, view.resource())? {
        return Ok(());
    }

    for album in view.visible() {
        writeln!(out, "[{}] {}", album.id, album.title)?;
    }

    let total = view.resource().items().len();
    let paginator = view.paginator();
    if paginator.page_count(total) > 1 {
        let pages: Vec<String> = paginator
            .page_numbers(total)
            .map(|page| {
                if page == paginator.page() {
                    format!("[{page}]")
                } else {
                    page.to_string()
                }
            })
            .collect();
        writeln!(out, "Pages: {}", pages.join(" "))?;
    }
    Ok(())
}

fn render_photos(out: &mut impl Write, view: &PhotosView) -> io::Result<()> {
    match view.album() {
        Some(album_id) => writeln!(out, "== Photos of album {album_id} ==")?,
        None => writeln!(out, "== Photos ==")?,
    }
    let filter = view.filter();
    if !filter.photo_id.is_empty() || !filter.album_id.is_empty() {
        writeln!(
            out,
            "photo id: {:?}  album id: {:?}",
            filter.photo_id, filter.album_id
        )?;
    }
    if render_loading(out, view.resource())? {
        return Ok(());
    }

    for photo in view.visible() {
        writeln!(
            out,
            "[{}] album {} {}",
            photo.id, photo.album_id, photo.thumbnail_url
        )?;
    }
    if let Some(photo) = view.enlarged() {
        writeln!(out, ">> Photo {}: {}", photo.id, photo.url)?;
    }
    Ok(())
}

fn render_posts(out: &mut impl Write, view: &PostsView, session: &Session) -> io::Result<()> {
    writeln!(out, "== Posts ==")?;
    if session.identity().is_some() {
        writeln!(out, "(post <title> | <body> to publish)")?;
    }
    if render_loading(out, view.resource())? {
        return Ok(());
    }

    for post in view.resource().items() {
        let deletable = session
            .identity()
            .is_some_and(|identity| identity.may_delete_post(post));
        writeln!(
            out,
            "[{}] {}{}",
            post.id,
            post.title,
            if deletable { "  (delete)" } else { "" }
        )?;
        writeln!(out, "    {}", post.body.replace('\n', "\n    "))?;
    }

    if let Some(comments) = view.comments() {
        render_comments(out, comments)?;
    }
    Ok(())
}

fn render_comments(out: &mut impl Write, view: &CommentsView) -> io::Result<()> {
    writeln!(out, "-- Comments on post {} --", view.post_id())?;
    if render_loading(out, view.resource())? {
        return Ok(());
    }

    for comment in view.resource().items() {
        writeln!(
            out,
            "[{}] {} <{}>{}",
            comment.id,
            comment.name,
            comment.email,
            if view.may_delete(comment) {
                "  (delete)"
            } else {
                ""
            }
        )?;
        writeln!(out, "    {}", comment.body.replace('\n', "\n    "))?;
    }
    if view.viewer().is_some() {
        writeln!(out, "(comment <header> | <body> to reply)")?;
    }
    Ok(())
}
