use axum::{extract::State, response::Html};

use crate::client::HealthStatus;
use crate::AppState;

/// GET /
///
/// Fetches both services' health in parallel and renders the summary page.
/// The two checks are joined all-or-nothing: if either fails, the page shows
/// a single error panel and no per-service status.
pub async fn dashboard(State(state): State<AppState>) -> Html<String> {
    match tokio::try_join!(state.api.service_a_health(), state.api.service_b_health()) {
        Ok((service_a, service_b)) => Html(render_status_page(&service_a, &service_b)),
        Err(e) => {
            tracing::error!(error = %e, "service health check failed");
            Html(render_error_page(&e.to_string()))
        }
    }
}

fn is_healthy(health: &HealthStatus) -> bool {
    health.status == "OK"
}

fn status_panel(name: &str, health: &HealthStatus) -> String {
    let (class, label) = if is_healthy(health) {
        ("healthy", "\u{2705} Healthy")
    } else {
        ("unhealthy", "\u{274c} Unhealthy")
    };
    format!(
        r#"<div class="panel"><h3>{name}</h3><p class="{class}">{label}</p></div>"#
    )
}

pub fn render_status_page(service_a: &HealthStatus, service_b: &HealthStatus) -> String {
    let panels = format!(
        "{}\n{}",
        status_panel("Service A", service_a),
        status_panel("Service B", service_b)
    );
    page(&panels)
}

pub fn render_error_page(message: &str) -> String {
    let panel = format!(
        "<div class=\"panel error\"><p>\u{274c} Error: {}</p></div>",
        escape(message)
    );
    page(&panel)
}

// Remote-derived text (error bodies in particular) goes through this before
// being interpolated into markup.
fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn page(content: &str) -> String {
    format!(
        r#"<!doctype html>
<html>
<head>
<meta charset="utf-8">
<title>Microservices Dashboard</title>
<style>
body {{ font-family: sans-serif; background: #fafafa; margin: 0; }}
main {{ max-width: 48rem; margin: 4rem auto; padding: 0 1rem; }}
.panel {{ background: #f4f4f5; border-radius: 0.5rem; padding: 1rem; margin-bottom: 1rem; }}
.panel.error {{ background: #fef2f2; }}
.healthy {{ color: #16a34a; }}
.unhealthy, .error {{ color: #dc2626; }}
</style>
</head>
<body>
<main>
<h1>Microservices Dashboard</h1>
{content}
<p>Real-time service health status from your microservices backend.</p>
</main>
</body>
</html>
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(s: &str) -> HealthStatus {
        HealthStatus {
            status: s.to_string(),
        }
    }

    #[test]
    fn both_ok_renders_two_healthy_panels() {
        let html = render_status_page(&status("OK"), &status("OK"));
        assert!(html.contains("Service A"));
        assert!(html.contains("Service B"));
        assert_eq!(html.matches(r#"class="healthy""#).count(), 2);
        assert!(!html.contains("Error:"));
    }

    #[test]
    fn non_ok_status_renders_unhealthy() {
        let html = render_status_page(&status("OK"), &status("DEGRADED"));
        assert!(html.contains(r#"class="healthy""#));
        assert!(html.contains(r#"class="unhealthy""#));
        assert!(!html.contains("Error:"));
    }

    #[test]
    fn empty_status_renders_unhealthy() {
        let html = render_status_page(&status(""), &status("ok"));
        assert_eq!(html.matches(r#"class="unhealthy""#).count(), 2);
    }

    #[test]
    fn error_page_has_message_and_no_status_panels() {
        let html = render_error_page("request to http://gateway:8080/api/service-a/health failed");
        assert!(html.contains("Error:"));
        assert!(html.contains("service-a/health failed"));
        assert!(!html.contains("Service A"));
        assert!(!html.contains(r#"class="healthy""#));
    }

    #[test]
    fn error_message_is_escaped() {
        let html = render_error_page("<script>alert(1)</script>");
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }
}
