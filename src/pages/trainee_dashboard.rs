//! Trainee dashboard: enrolled courses and spending

use leptos::logging::warn;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::components::{ListToolbar, PaginationBar, RequireRole, StatusBadge};
use crate::config::app_config;
use crate::list::{status_options, FilterField, FilterState, ListController, SortKey};
use crate::models::{format_date, format_price, Course, Order, Role};
use crate::pages::StatCard;

#[component]
pub fn TraineeDashboard() -> impl IntoView {
    view! {
        <RequireRole role=Role::Trainee>
            <TraineeOverview />
        </RequireRole>
    }
}

/// (orders, open orders, amount spent); cancelled orders are not spending
fn order_stats(orders: &[Order]) -> (usize, usize, f64) {
    let open = orders
        .iter()
        .filter(|o| matches!(o.status.as_str(), "pending" | "paid" | "shipped"))
        .count();
    let spent = orders.iter().filter(|o| o.status != "cancelled").map(|o| o.total).sum();
    (orders.len(), open, spent)
}

#[component]
fn TraineeOverview() -> impl IntoView {
    let list = ListController::<Course>::new(
        "course",
        FilterState::on_category().with_sort(SortKey::TitleAsc),
        app_config().page_size,
    );
    let projected = list.projection();
    let count = Signal::derive(move || projected.with(Vec::len));
    let options = Signal::derive(move || list.collection.with(|c| status_options(c.items(), FilterField::Category)));

    let orders = RwSignal::new(Vec::<Order>::new());
    list.load(api::list_enrolled_courses);
    spawn_local(async move {
        match api::list_orders().await {
            Ok(loaded) => {
                orders.try_set(loaded);
            }
            Err(e) => warn!("[APP] Loading order stats failed: {}", e),
        }
    });

    let stats = move || orders.with(|o| order_stats(o));

    view! {
        <section class="dashboard">
            <header class="dashboard-header">
                <h1>"My training"</h1>
                <a class="btn" href="/courses">"Find more courses"</a>
            </header>

            <div class="stat-grid">
                <StatCard label="Courses" value=Signal::derive(move || list.collection.with(|c| c.len()).to_string()) />
                <StatCard label="Orders" value=Signal::derive(move || stats().0.to_string()) />
                <StatCard label="Open orders" value=Signal::derive(move || stats().1.to_string()) />
                <StatCard label="Spent" value=Signal::derive(move || format_price(stats().2)) />
            </div>

            <ListToolbar
                filter=list.filter
                options=options
                placeholder="Search my courses..."
                filter_label="Category"
            />
            <table class="data-table">
                <thead>
                    <tr>
                        <th>"Course"</th>
                        <th>"Category"</th>
                        <th>"Trainer"</th>
                        <th>"Weeks"</th>
                        <th>"Status"</th>
                        <th>"Created"</th>
                    </tr>
                </thead>
                <tbody>
                    {move || list.page_rows(projected).into_iter().map(|course| view! {
                        <tr>
                            <td><a href=format!("/courses/{}", course.id)>{course.title.clone()}</a></td>
                            <td>{course.category.clone()}</td>
                            <td>{course.trainer_name.clone().unwrap_or_default()}</td>
                            <td>{course.duration_weeks}</td>
                            <td><StatusBadge status=course.status.clone() /></td>
                            <td>{format_date(course.created_at.as_deref())}</td>
                        </tr>
                    }).collect_view()}
                </tbody>
            </table>
            <Show when=move || !list.loading() && count.get() == 0>
                <p class="empty">"You are not enrolled in any course yet."</p>
            </Show>
            <PaginationBar pager=list.pager count=count />
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(id: u32, status: &str, total: f64) -> Order {
        Order {
            id,
            customer_name: "Ana".into(),
            status: status.into(),
            total,
            course_id: None,
            items: vec![],
            created_at: None,
        }
    }

    #[test]
    fn test_order_stats_skip_cancelled_spending() {
        let orders = vec![order(1, "pending", 10.0), order(2, "completed", 25.0), order(3, "cancelled", 99.0)];
        assert_eq!(order_stats(&orders), (3, 1, 35.0));
    }

    #[test]
    fn test_order_stats_empty() {
        assert_eq!(order_stats(&[]), (0, 0, 0.0));
    }
}
