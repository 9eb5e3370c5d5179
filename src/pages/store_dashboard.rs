//! Store dashboard: product catalogue and incoming orders

use leptos::logging::warn;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::components::{
    FormError, FormField, ListToolbar, ModalFrame, PaginationBar, RequireRole, RowActions, StatusBadge,
    StatusSelect,
};
use crate::config::app_config;
use crate::forms::{parse_price_input, ProductForm};
use crate::list::{status_options, FilterField, FilterState, ListController, Modal, SortKey};
use crate::models::{format_date, format_price, Product, Role};
use crate::pages::orders::{OrderSource, OrderTable};
use crate::pages::StatCard;

/// Stock at or below this is flagged on the dashboard
const LOW_STOCK: u32 = 5;

#[component]
pub fn StoreDashboard() -> impl IntoView {
    view! {
        <RequireRole role=Role::Store>
            <section class="dashboard">
                <h1>"Store"</h1>
                <ProductsTable />
                <div class="dashboard-panel">
                    <h2>"Incoming orders"</h2>
                    <OrderTable source=OrderSource::Store />
                </div>
            </section>
        </RequireRole>
    }
}

#[component]
fn ProductsTable() -> impl IntoView {
    let list = ListController::<Product>::new(
        "product",
        FilterState::on_category().with_sort(SortKey::TitleAsc),
        app_config().page_size,
    );
    let projected = list.projection();
    let count = Signal::derive(move || projected.with(Vec::len));
    let options = Signal::derive(move || list.collection.with(|c| status_options(c.items(), FilterField::Category)));
    let create_modal = RwSignal::new(Modal::<ProductForm>::default());

    list.load(api::list_products);

    let low_stock = move || {
        list.collection
            .with(|c| c.items().iter().filter(|p| p.stock <= LOW_STOCK).count())
            .to_string()
    };

    view! {
        <div class="dashboard-panel">
            <header class="panel-header">
                <h2>"Products"</h2>
                <StatCard label="Products" value=Signal::derive(move || list.collection.with(|c| c.len()).to_string()) />
                <StatCard label="Low stock" value=Signal::derive(low_stock) />
                <button class="btn btn-primary" on:click=move |_| create_modal.update(|m| m.open_empty())>
                    "New product"
                </button>
            </header>
            <ListToolbar
                filter=list.filter
                options=options
                placeholder="Search products..."
                filter_label="Category"
            />
            <table class="data-table">
                <thead>
                    <tr>
                        <th>"ID"</th>
                        <th>"Name"</th>
                        <th>"Category"</th>
                        <th>"Price"</th>
                        <th>"Stock"</th>
                        <th>"Status"</th>
                        <th>"Added"</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody>
                    {move || list.page_rows(projected).into_iter().map(|product| view! {
                        <ProductRow list=list product=product />
                    }).collect_view()}
                </tbody>
            </table>
            <PaginationBar pager=list.pager count=count />

            <Show when=move || create_modal.with(Modal::is_open)>
                <CreateProductModal modal=create_modal list=list />
            </Show>
        </div>
    }
}

#[component]
fn ProductRow(list: ListController<Product>, product: Product) -> impl IntoView {
    let id = product.id;
    let editing = Memo::new(move |_| list.is_editing(id));
    let read_status = product.status.clone();
    let read_price = product.price;
    let read_stock = product.stock;
    let low_stock = read_stock <= LOW_STOCK;

    let on_save = move |_: ()| {
        list.save(|before, after| async move { api::update_product(&before, &after).await });
    };
    let on_delete = move |_: ()| list.confirm_delete(api::delete_product);

    view! {
        <tr class:editing=move || editing.get() class:low-stock=low_stock>
            <td>{id}</td>
            <td>{editable_text!(list, editing, product.name.clone(), name)}</td>
            <td>{product.category.clone()}</td>
            <td>
                {move || if editing.get() {
                    view! {
                        <input
                            type="number"
                            step="0.01"
                            min="0"
                            prop:value=move || list.staged_field(|p| p.price).to_string()
                            on:change=move |ev| {
                                if let Some(price) = parse_price_input(&event_target_value(&ev)) {
                                    list.stage(|p| p.price = price);
                                }
                            }
                        />
                    }.into_any()
                } else {
                    format_price(read_price).into_any()
                }}
            </td>
            <td>
                {move || if editing.get() {
                    view! {
                        <input
                            type="number"
                            min="0"
                            prop:value=move || list.staged_field(|p| p.stock).to_string()
                            on:change=move |ev| {
                                if let Ok(stock) = event_target_value(&ev).trim().parse::<u32>() {
                                    list.stage(|p| p.stock = stock);
                                }
                            }
                        />
                    }.into_any()
                } else {
                    read_stock.to_string().into_any()
                }}
            </td>
            <td>
                {move || if editing.get() {
                    view! {
                        <StatusSelect
                            options=&Product::STATUSES
                            value=Signal::derive(move || list.staged_field(|p| p.status.clone()))
                            on_change=move |status: String| list.stage(|p| p.status = status)
                        />
                    }.into_any()
                } else {
                    view! { <StatusBadge status=read_status.clone() /> }.into_any()
                }}
            </td>
            <td>{format_date(product.created_at.as_deref())}</td>
            <RowActions list=list id=id on_save=on_save on_delete=on_delete />
        </tr>
    }
}

#[component]
fn CreateProductModal(modal: RwSignal<Modal<ProductForm>>, list: ListController<Product>) -> impl IntoView {
    let error = RwSignal::new(None::<String>);
    let submitting = RwSignal::new(false);

    let field = move |get: fn(&ProductForm) -> &String| {
        Signal::derive(move || modal.with(|m| m.field(|f| get(f).clone()).unwrap_or_default()))
    };
    let close = Callback::new(move |_: ()| modal.update(|m| m.close()));

    let submit = move |_| {
        if submitting.get_untracked() {
            return;
        }
        let Some(form) = modal.with_untracked(|m| m.snapshot()) else { return };
        let new_product = match form.to_new_product() {
            Ok(new_product) => new_product,
            Err(e) => {
                error.set(Some(e.message));
                return;
            }
        };
        error.set(None);
        submitting.set(true);
        spawn_local(async move {
            match api::create_product(&new_product).await {
                Ok(created) => {
                    list.push_created(created);
                    modal.update(|m| m.close());
                }
                Err(e) => {
                    warn!("[APP] Creating product failed: {}", e);
                    error.try_set(Some(e.user_message()));
                }
            }
            submitting.try_set(false);
        });
    };

    view! {
        <ModalFrame title="New product" on_close=close>
            <FormField
                label="Name"
                value=field(|f| &f.name)
                on_input=move |v: String| modal.update(|m| m.edit(|f| f.name = v))
            />
            <FormField
                label="Category"
                value=field(|f| &f.category)
                on_input=move |v: String| modal.update(|m| m.edit(|f| f.category = v))
            />
            <FormField
                label="Price"
                input_type="number"
                value=field(|f| &f.price)
                on_input=move |v: String| modal.update(|m| m.edit(|f| f.price = v))
            />
            <FormField
                label="Stock"
                input_type="number"
                value=field(|f| &f.stock)
                on_input=move |v: String| modal.update(|m| m.edit(|f| f.stock = v))
            />
            <FormError message=error />
            <div class="modal-actions">
                <button class="btn" on:click=move |_| close.run(())>"Cancel"</button>
                <button class="btn btn-primary" disabled=move || submitting.get() on:click=submit>
                    "Create"
                </button>
            </div>
        </ModalFrame>
    }
}
