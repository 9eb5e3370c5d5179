//! Orders
//!
//! Trainees see their own orders; stores see orders placed with them. Both
//! use the same table with an inline status edit.

use leptos::prelude::*;

use crate::api;
use crate::components::{ListToolbar, PaginationBar, RequireRole, RowActions, StatusBadge, StatusSelect};
use crate::config::app_config;
use crate::list::{status_options, FilterField, FilterState, ListController, SortKey};
use crate::models::{format_date, format_price, Order, OrderLine, Role};
use crate::store::{store_role, use_app_store};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderSource {
    /// Orders the signed-in user placed
    Mine,
    /// Orders placed with the signed-in store
    Store,
}

#[component]
pub fn OrdersPage() -> impl IntoView {
    let store = use_app_store();
    view! {
        <RequireRole>
            {move || {
                let source = match store_role(&store) {
                    Some(Role::Store) => OrderSource::Store,
                    _ => OrderSource::Mine,
                };
                view! {
                    <section class="dashboard">
                        <h1>"Orders"</h1>
                        <OrderTable source=source />
                    </section>
                }
            }}
        </RequireRole>
    }
}

fn line_summary(items: &[OrderLine]) -> String {
    match items {
        [] => "—".to_string(),
        [only] => format!("{} × {}", only.quantity, only.name),
        [first, rest @ ..] => format!("{} × {} +{} more", first.quantity, first.name, rest.len()),
    }
}

#[component]
pub fn OrderTable(source: OrderSource) -> impl IntoView {
    let list = ListController::<Order>::new(
        "order",
        FilterState::default().with_sort(SortKey::DateDesc),
        app_config().page_size,
    );
    let projected = list.projection();
    let count = Signal::derive(move || projected.with(Vec::len));
    let options = Signal::derive(move || list.collection.with(|c| status_options(c.items(), FilterField::Status)));

    match source {
        OrderSource::Mine => list.load(api::list_orders),
        OrderSource::Store => list.load(api::list_store_orders),
    }

    view! {
        <div class="dashboard-panel">
            <ListToolbar filter=list.filter options=options placeholder="Search orders..." />
            <table class="data-table">
                <thead>
                    <tr>
                        <th>"Order"</th>
                        <th>"Customer"</th>
                        <th>"Items"</th>
                        <th>"Total"</th>
                        <th>"Status"</th>
                        <th>"Placed"</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody>
                    {move || list.page_rows(projected).into_iter().map(|order| view! {
                        <OrderRow list=list order=order />
                    }).collect_view()}
                </tbody>
            </table>
            <Show when=move || list.loading()>
                <p class="loading">"Loading orders..."</p>
            </Show>
            <Show when=move || !list.loading() && count.get() == 0>
                <p class="empty">"No orders found."</p>
            </Show>
            <PaginationBar pager=list.pager count=count />
        </div>
    }
}

#[component]
fn OrderRow(list: ListController<Order>, order: Order) -> impl IntoView {
    let id = order.id;
    let editing = Memo::new(move |_| list.is_editing(id));
    let read_status = order.status.clone();

    let on_save = move |_: ()| {
        list.save(|before, after| async move { api::update_order(&before, &after).await });
    };
    let on_delete = move |_: ()| list.confirm_delete(api::delete_order);

    view! {
        <tr class:editing=move || editing.get()>
            <td>{format!("#{}", id)}</td>
            <td>{order.customer_name.clone()}</td>
            <td>{line_summary(&order.items)}</td>
            <td>{format_price(order.total)}</td>
            <td>
                {move || if editing.get() {
                    view! {
                        <StatusSelect
                            options=&Order::STATUSES
                            value=Signal::derive(move || list.staged_field(|o| o.status.clone()))
                            on_change=move |status: String| list.stage(|o| o.status = status)
                        />
                    }.into_any()
                } else {
                    view! { <StatusBadge status=read_status.clone() /> }.into_any()
                }}
            </td>
            <td>{format_date(order.created_at.as_deref())}</td>
            <RowActions list=list id=id on_save=on_save on_delete=on_delete />
        </tr>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(name: &str, quantity: u32) -> OrderLine {
        OrderLine { name: name.into(), quantity, price: 5.0 }
    }

    #[test]
    fn test_line_summary() {
        assert_eq!(line_summary(&[]), "—");
        assert_eq!(line_summary(&[line("Yoga mat", 1)]), "1 × Yoga mat");
        assert_eq!(
            line_summary(&[line("Whey", 2), line("Shaker", 1), line("Band", 3)]),
            "2 × Whey +2 more"
        );
    }
}
