use maud::{html, Markup, PreEscaped, DOCTYPE};

const STYLE: &str = r#"
body { font-family: system-ui, sans-serif; background: #f5f5f5; color: #1a1a1a; margin: 0; }
header { background: white; border-bottom: 1px solid rgba(0,0,0,0.05); padding: 1rem 1.5rem; display: flex; justify-content: space-between; align-items: center; }
main { max-width: 64rem; margin: 2rem auto; padding: 0 1.5rem; display: grid; grid-template-columns: 2fr 1fr; gap: 2rem; }
.card { background: white; border-radius: 1.5rem; padding: 1.5rem; border: 1px solid rgba(0,0,0,0.05); margin-bottom: 1rem; }
.chore { display: flex; justify-content: space-between; align-items: center; }
.chore.not-due { opacity: 0.6; }
.badge { font-size: 0.75rem; font-weight: bold; text-transform: uppercase; letter-spacing: 0.1em; padding: 0.25rem 0.75rem; border-radius: 999px; }
.badge.upcoming { color: #2563eb; background: #eff6ff; }
.badge.completed { color: #059669; background: #ecfdf5; }
.badge.due-today { color: #d97706; background: #fffbeb; }
.badge.overdue { color: #dc2626; background: #fef2f2; }
.bar { height: 0.5rem; background: #f3f4f6; border-radius: 999px; overflow: hidden; }
.bar > div { height: 100%; background: #10b981; }
.tabs a { padding: 0.25rem 0.75rem; border-radius: 0.5rem; text-decoration: none; color: #4b5563; }
.tabs a.active { background: white; color: #059669; font-weight: bold; }
.notifications { background: black; color: white; }
"#;

// Long-polls the change feed and reloads once anything changed.
const LIVE_RELOAD: &str = r#"
(function () {
  var version = Number(document.body.dataset.feedVersion || 0);
  function poll() {
    fetch('/api/events?since=' + version)
      .then(function (r) { return r.json(); })
      .then(function (snap) {
        if (snap.version !== version) { window.location.reload(); return; }
        if (snap.retry_after_secs) { setTimeout(poll, snap.retry_after_secs * 1000); return; }
        poll();
      })
      .catch(function () { setTimeout(poll, 5000); });
  }
  poll();
})();
"#;

pub fn desktop_layout(title: &str, feed_version: u64, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) " · ChoreSync" }
                style { (PreEscaped(STYLE)) }
            }
            body data-feed-version=(feed_version) {
                header {
                    h1 { "ChoreSync" }
                }
                (content)
                script { (PreEscaped(LIVE_RELOAD)) }
            }
        }
    }
}
