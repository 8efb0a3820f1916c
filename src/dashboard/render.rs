use super::state::DashboardState;
use super::summary::format_amount;
use crate::order::Order;

/// Escape text for use inside HTML element content or attribute values
fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn render_rows(orders: &[Order], empty_message: &str, currency_symbol: &str) -> String {
    if orders.is_empty() {
        return format!(
            r#"<tr><td colspan="3" class="empty-state"><p>{}</p></td></tr>"#,
            empty_message
        );
    }

    orders
        .iter()
        .map(|order| {
            format!(
                r#"<tr><td>{toy}</td><td><span class="status-badge {class}">{status}</span></td><td>{amount}</td></tr>"#,
                toy = escape_html(&order.toy_name),
                class = order.status.badge_class(),
                status = order.status,
                amount = format_amount(currency_symbol, order.total_amount),
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_employee_options(employees: &[String], current: &str) -> String {
    let mut names: Vec<&str> = employees.iter().map(String::as_str).collect();
    if !names.contains(&current) {
        names.insert(0, current);
    }

    names
        .iter()
        .map(|name| {
            let selected = if *name == current { " selected" } else { "" };
            format!(
                r#"<option value="{value}"{selected}>{value}</option>"#,
                value = escape_html(name),
                selected = selected
            )
        })
        .collect::<Vec<_>>()
        .join("")
}

/// Render the dashboard page
pub fn render_dashboard(state: &DashboardState, employees: &[String], currency_symbol: &str) -> String {
    let summary = state.summary();

    let (connection_class, connection_label) = if state.is_connected() {
        ("connected", "Connected")
    } else {
        ("disconnected", "Disconnected")
    };

    let revenue_class = if summary.revenue >= 0.0 { "green" } else { "red" };

    let last_updated = state
        .last_updated()
        .map(|t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| "never".to_string());

    format!(
        r##"<!DOCTYPE html>
<html>
<head>
    <title>{employee} - Order Dashboard</title>
    <meta charset="utf-8">
    <meta http-equiv="refresh" content="5">
    <style>
        :root {{
            --bg-primary: #0a0a0f;
            --bg-card: #1a1a24;
            --border: #2a2a3a;
            --text-primary: #ffffff;
            --text-secondary: #8888a0;
            --green: #00d4aa;
            --red: #ff4d6a;
            --yellow: #ffd93d;
            --blue: #4d9fff;
        }}
        * {{ margin: 0; padding: 0; box-sizing: border-box; }}
        body {{
            font-family: -apple-system, sans-serif;
            background: var(--bg-primary);
            color: var(--text-primary);
        }}
        .container {{ max-width: 1100px; margin: 0 auto; padding: 24px; }}
        header {{
            display: flex;
            justify-content: space-between;
            align-items: center;
            margin-bottom: 24px;
        }}
        .connection-status {{ display: flex; align-items: center; gap: 8px; font-size: 13px; }}
        .status-indicator {{ width: 10px; height: 10px; border-radius: 50%; }}
        .connected .status-indicator {{ background: var(--green); }}
        .disconnected .status-indicator {{ background: var(--red); }}
        .stats {{ display: grid; grid-template-columns: repeat(4, 1fr); gap: 12px; margin-bottom: 24px; }}
        .card {{ background: var(--bg-card); border: 1px solid var(--border); border-radius: 8px; padding: 16px; }}
        .card-title {{ font-size: 12px; color: var(--text-secondary); margin-bottom: 6px; }}
        .card-value {{ font-size: 22px; font-weight: 600; }}
        .green {{ color: var(--green); }}
        .red {{ color: var(--red); }}
        table {{ width: 100%; border-collapse: collapse; margin-bottom: 24px; }}
        th, td {{ text-align: left; padding: 8px 12px; border-bottom: 1px solid var(--border); font-size: 13px; }}
        th {{ color: var(--text-secondary); font-weight: 500; }}
        .empty-state {{ text-align: center; color: var(--text-secondary); }}
        .status-badge {{ padding: 2px 8px; border-radius: 4px; font-size: 11px; }}
        .status-pending {{ background: rgba(255,217,61,0.15); color: var(--yellow); }}
        .status-cancel {{ background: rgba(255,77,106,0.15); color: var(--red); }}
        .status-on-the-way {{ background: rgba(77,159,255,0.15); color: var(--blue); }}
        .status-delivered {{ background: rgba(0,212,170,0.15); color: var(--green); }}
        .status-returned {{ background: rgba(255,77,106,0.15); color: var(--red); }}
        footer {{ font-size: 11px; color: var(--text-secondary); }}
    </style>
</head>
<body>
    <div class="container">
        <header>
            <h1 id="employeeName">{employee}</h1>
            <form method="post" action="/employee">
                <select id="employeeSelect" name="employee" onchange="this.form.submit()">{options}</select>
                <noscript><button type="submit">Show</button></noscript>
            </form>
            <div id="connectionStatus" class="connection-status {connection_class}">
                <div class="status-indicator"></div>
                <span>{connection_label}</span>
            </div>
        </header>

        <div class="stats">
            <div class="card"><div class="card-title">Total Revenue</div><div id="totalRevenue" class="card-value {revenue_class}">{revenue}</div></div>
            <div class="card"><div class="card-title">Pending</div><div id="pendingCount" class="card-value">{pending_count}</div></div>
            <div class="card"><div class="card-title">Processed</div><div id="processedCount" class="card-value">{processed_count}</div></div>
            <div class="card"><div class="card-title">Returned</div><div id="returnedCount" class="card-value">{returned_count}</div></div>
        </div>

        <h2>Pending Orders</h2>
        <table>
            <thead><tr><th>Toy</th><th>Status</th><th>Amount</th></tr></thead>
            <tbody id="pendingOrdersBody">
{pending_rows}
            </tbody>
        </table>

        <h2>Processed Orders</h2>
        <table>
            <thead><tr><th>Toy</th><th>Status</th><th>Amount</th></tr></thead>
            <tbody id="processedOrdersBody">
{processed_rows}
            </tbody>
        </table>

        <footer>Last updated: {last_updated}</footer>
    </div>
</body>
</html>"##,
        employee = escape_html(state.employee()),
        options = render_employee_options(employees, state.employee()),
        connection_class = connection_class,
        connection_label = connection_label,
        revenue_class = revenue_class,
        revenue = format_amount(currency_symbol, summary.revenue),
        pending_count = summary.pending_count(),
        processed_count = summary.processed_count(),
        returned_count = summary.returned_count,
        pending_rows = render_rows(&summary.pending, "No pending orders", currency_symbol),
        processed_rows = render_rows(&summary.processed, "No processed orders", currency_symbol),
        last_updated = last_updated,
    )
}

fn text_rows(out: &mut String, orders: &[Order], empty_message: &str, currency_symbol: &str) {
    if orders.is_empty() {
        out.push_str(&format!("  {}\n", empty_message));
        return;
    }

    for order in orders {
        out.push_str(&format!(
            "  {:<24} | {:<10} | {:>12}\n",
            order.toy_name,
            order.status,
            format_amount(currency_symbol, order.total_amount)
        ));
    }
}

/// Render the dashboard as plain text for the console
pub fn render_text(state: &DashboardState, currency_symbol: &str) -> String {
    let summary = state.summary();
    let mut out = String::new();

    out.push_str(&format!(
        "{} [{}]\n\n",
        state.employee(),
        if state.is_connected() { "Connected" } else { "Disconnected" }
    ));
    out.push_str(&format!(
        "Revenue: {} | Pending: {} | Processed: {} | Returned: {}\n\n",
        format_amount(currency_symbol, summary.revenue),
        summary.pending_count(),
        summary.processed_count(),
        summary.returned_count
    ));

    out.push_str("Pending Orders\n");
    text_rows(&mut out, &summary.pending, "No pending orders", currency_symbol);
    out.push_str("\nProcessed Orders\n");
    text_rows(&mut out, &summary.processed, "No processed orders", currency_symbol);

    out
}
