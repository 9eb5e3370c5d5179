//! Gym dashboard: staff trainers and members

use leptos::prelude::*;

use crate::api;
use crate::components::{ListToolbar, PaginationBar, RequireRole, RowActions, StatusBadge, StatusSelect};
use crate::config::app_config;
use crate::list::{status_options, FilterField, FilterState, ListController, SortKey};
use crate::models::{format_date, Member, Role, Trainer};
use crate::pages::StatCard;

#[component]
pub fn GymDashboard() -> impl IntoView {
    view! {
        <RequireRole role=Role::Gym>
            <section class="dashboard">
                <h1>"Gym overview"</h1>
                <TrainersTable />
                <MembersTable />
            </section>
        </RequireRole>
    }
}

#[component]
fn TrainersTable() -> impl IntoView {
    let list = ListController::<Trainer>::new(
        "trainer",
        FilterState::default().with_sort(SortKey::TitleAsc),
        app_config().page_size,
    );
    let projected = list.projection();
    let count = Signal::derive(move || projected.with(Vec::len));
    let options = Signal::derive(move || list.collection.with(|c| status_options(c.items(), FilterField::Status)));

    list.load(api::list_trainers);

    let active = move || {
        list.collection
            .with(|c| c.items().iter().filter(|t| t.status == "active").count())
            .to_string()
    };

    view! {
        <div class="dashboard-panel">
            <header class="panel-header">
                <h2>"Trainers"</h2>
                <StatCard label="Active" value=Signal::derive(active) />
            </header>
            <ListToolbar filter=list.filter options=options placeholder="Search trainers..." />
            <table class="data-table">
                <thead>
                    <tr>
                        <th>"ID"</th>
                        <th>"Name"</th>
                        <th>"Specialty"</th>
                        <th>"Rating"</th>
                        <th>"Status"</th>
                        <th>"Joined"</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody>
                    {move || list.page_rows(projected).into_iter().map(|trainer| view! {
                        <TrainerRow list=list trainer=trainer />
                    }).collect_view()}
                </tbody>
            </table>
            <PaginationBar pager=list.pager count=count />
        </div>
    }
}

#[component]
fn TrainerRow(list: ListController<Trainer>, trainer: Trainer) -> impl IntoView {
    let id = trainer.id;
    let editing = Memo::new(move |_| list.is_editing(id));
    let read_status = trainer.status.clone();

    let on_save = move |_: ()| {
        list.save(|before, after| async move { api::update_trainer(&before, &after).await });
    };
    let on_delete = move |_: ()| list.confirm_delete(api::delete_trainer);

    view! {
        <tr class:editing=move || editing.get()>
            <td>{id}</td>
            <td>{trainer.name.clone()}</td>
            <td>{editable_text!(list, editing, trainer.specialty.clone(), specialty)}</td>
            <td>{format!("★ {:.1}", trainer.rating)}</td>
            <td>
                {move || if editing.get() {
                    view! {
                        <StatusSelect
                            options=&Trainer::STATUSES
                            value=Signal::derive(move || list.staged_field(|t| t.status.clone()))
                            on_change=move |status: String| list.stage(|t| t.status = status)
                        />
                    }.into_any()
                } else {
                    view! { <StatusBadge status=read_status.clone() /> }.into_any()
                }}
            </td>
            <td>{format_date(trainer.joined_at.as_deref())}</td>
            <RowActions list=list id=id on_save=on_save on_delete=on_delete />
        </tr>
    }
}

#[component]
fn MembersTable() -> impl IntoView {
    let list = ListController::<Member>::new(
        "member",
        FilterState::default().with_sort(SortKey::DateDesc),
        app_config().page_size,
    );
    let projected = list.projection();
    let count = Signal::derive(move || projected.with(Vec::len));
    let options = Signal::derive(move || list.collection.with(|c| status_options(c.items(), FilterField::Status)));

    list.load(api::list_members);

    view! {
        <div class="dashboard-panel">
            <header class="panel-header">
                <h2>"Members"</h2>
                <StatCard label="Total" value=Signal::derive(move || list.collection.with(|c| c.len()).to_string()) />
            </header>
            <ListToolbar filter=list.filter options=options placeholder="Search members..." />
            <table class="data-table">
                <thead>
                    <tr>
                        <th>"ID"</th>
                        <th>"Name"</th>
                        <th>"Plan"</th>
                        <th>"Status"</th>
                        <th>"Joined"</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody>
                    {move || list.page_rows(projected).into_iter().map(|member| view! {
                        <MemberRow list=list member=member />
                    }).collect_view()}
                </tbody>
            </table>
            <PaginationBar pager=list.pager count=count />
        </div>
    }
}

#[component]
fn MemberRow(list: ListController<Member>, member: Member) -> impl IntoView {
    let id = member.id;
    let editing = Memo::new(move |_| list.is_editing(id));
    let read_status = member.status.clone();

    let on_save = move |_: ()| {
        list.save(|before, after| async move { api::update_member(&before, &after).await });
    };
    let on_delete = move |_: ()| list.confirm_delete(api::delete_member);

    view! {
        <tr class:editing=move || editing.get()>
            <td>{id}</td>
            <td>{member.name.clone()}</td>
            <td>{editable_text!(list, editing, member.plan.clone(), plan)}</td>
            <td>
                {move || if editing.get() {
                    view! {
                        <StatusSelect
                            options=&Member::STATUSES
                            value=Signal::derive(move || list.staged_field(|m| m.status.clone()))
                            on_change=move |status: String| list.stage(|m| m.status = status)
                        />
                    }.into_any()
                } else {
                    view! { <StatusBadge status=read_status.clone() /> }.into_any()
                }}
            </td>
            <td>{format_date(member.joined_at.as_deref())}</td>
            <RowActions list=list id=id on_save=on_save on_delete=on_delete />
        </tr>
    }
}
