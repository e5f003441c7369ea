//! Deployment banner script endpoint.
//!
//! Serves `/js/deployment-bar.js`: a generated script that injects a colored
//! bar at the top of the page naming the zone and version the browser
//! reached, with a link that pins the browser to the other zone through the
//! `X-Force-Zone` cookie the routing tier honors. The script is rebuilt on
//! every request so it always reflects the live availability flag.

use axum::{extract::State, response::IntoResponse};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use chrono::Utc;
use http::header::CONTENT_TYPE;
use tracing::instrument;

use crate::config::{SESSION_COOKIE, VERSION};
use crate::state::AppState;

/// The zone offered by the switch link: green for blue, blue for everything
/// else (including unknown tokens and the "undefined" display token).
fn other_zone(zone: &str) -> &'static str {
    if zone == "blue" {
        "green"
    } else {
        "blue"
    }
}

/// Serve the generated banner script.
///
/// Anti-cache headers are stamped by the route layer; the handler sets the
/// content type and the session-continuity marker cookie.
#[instrument(name = "deployment_bar::script", skip(state, jar))]
pub async fn script(State(state): State<AppState>, jar: CookieJar) -> impl IntoResponse {
    // Session-continuity marker: set once per browser session, never read
    // back by this service. External checks compare it across a zone switch
    // to prove the switch did not drop the session.
    let jar = if jar.get(SESSION_COOKIE).is_none() {
        jar.add(
            Cookie::build((SESSION_COOKIE, Utc::now().to_rfc3339()))
                .path("/")
                .http_only(true)
                .same_site(SameSite::Lax)
                .build(),
        )
    } else {
        jar
    };

    let zone = state.config.deployment.zone.as_deref();
    if zone.is_none() {
        tracing::warn!("Deployment zone not configured, emitting alert diagnostic");
    }

    let body = render_bar_script(zone, state.availability.is_available());

    (jar, [(CONTENT_TYPE, "application/javascript")], body)
}

/// Render the banner script for one request.
///
/// `zone = None` is the misconfigured case: the script then opens with an
/// `alert(...)` naming the missing setting and the bar renders the literal
/// token `undefined`.
fn render_bar_script(zone: Option<&str>, available: bool) -> String {
    let mut script = String::new();
    if zone.is_none() {
        script.push_str(
            "alert('Application configuration ERROR: deployment zone (blue/green) \
             not set via the \\'zone\\' setting as expected');\n",
        );
    }
    let zone = zone.unwrap_or("undefined");
    let other_zone = other_zone(zone);

    let (version_message, other_version_label, bgr_color) = if available {
        (
            format!("You are running the newest version {VERSION}"),
            "previous",
            "darksalmon",
        )
    } else {
        (
            format!("You are running an old version ({VERSION}), consider switching"),
            "newest",
            "darkred",
        )
    };

    // Path=/ keeps the override cookie identical no matter where in the app
    // the user clicks the link.
    let switch_version_url = format!(
        "javascript:document.cookie=\"X-Force-Zone={other_zone}; Path=/\";\
         document.location.reload(true);false"
    );

    // The zone doubles as a CSS color for the bullet. It is operator
    // configuration, not request input, and is interpolated unescaped.
    let bar_html = format!(
        "<div id='deploymentBar' style='background-color:{bgr_color};\
         position:absolute;top:0px;left:0px;width:100%;'>{version_message}\
         <span style='float:right'>[<a href='{switch_version_url}'>\
         Switch to the {other_version_label} version</a>] \
         <span style='color:{zone}'>&#x25CF;</span></span></div>"
    );

    // The fragment rides inside a single-quoted JS string literal.
    let escaped = bar_html.replace('\'', "\\'");

    script.push_str(&format!(
        "var onloadOld=window.onload;window.onload=(function(){{\n\
         var body=document.getElementsByTagName('body')[0];\n\
         var elm=document.createElement('div');\n\
         elm.innerHTML='{escaped}';\n\
         var jsDiv=elm.firstChild;\n\
         body.insertBefore(jsDiv, body.firstChild);\n\
         if (onloadOld) onloadOld();\n\
         }});\n"
    ));
    script
}
