//! Trainer dashboard: the trainer's own courses

use leptos::logging::warn;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::components::{
    FormError, FormField, FormTextArea, ListToolbar, ModalFrame, PaginationBar, RequireRole, RowActions,
    StatusBadge, StatusSelect,
};
use crate::config::app_config;
use crate::forms::{parse_price_input, CourseForm};
use crate::list::{status_options, FilterField, FilterState, ListController, Modal, SortKey};
use crate::models::{format_date, format_price, Course, Role};
use crate::pages::StatCard;

#[component]
pub fn TrainerDashboard() -> impl IntoView {
    view! {
        <RequireRole role=Role::Trainer>
            <TrainerCourses />
        </RequireRole>
    }
}

#[component]
fn TrainerCourses() -> impl IntoView {
    let list = ListController::<Course>::new(
        "course",
        FilterState::default().with_sort(SortKey::DateDesc),
        app_config().page_size,
    );
    let projected = list.projection();
    let count = Signal::derive(move || projected.with(Vec::len));
    let options = Signal::derive(move || list.collection.with(|c| status_options(c.items(), FilterField::Status)));
    let create_modal = RwSignal::new(Modal::<CourseForm>::default());

    list.load(api::list_my_courses);

    let stats = move || {
        list.collection.with(|c| {
            let courses = c.items();
            let published = courses.iter().filter(|c| c.is_published()).count();
            let enrolled: u32 = courses.iter().map(|c| c.enrolled).sum();
            let revenue: f64 = courses.iter().map(|c| c.price * f64::from(c.enrolled)).sum();
            (courses.len(), published, enrolled, revenue)
        })
    };

    view! {
        <section class="dashboard">
            <header class="dashboard-header">
                <h1>"My courses"</h1>
                <button class="btn btn-primary" on:click=move |_| create_modal.update(|m| m.open_empty())>
                    "New course"
                </button>
            </header>

            <div class="stat-grid">
                <StatCard label="Courses" value=Signal::derive(move || stats().0.to_string()) />
                <StatCard label="Published" value=Signal::derive(move || stats().1.to_string()) />
                <StatCard label="Trainees" value=Signal::derive(move || stats().2.to_string()) />
                <StatCard label="Revenue" value=Signal::derive(move || format_price(stats().3)) />
            </div>

            <ListToolbar filter=list.filter options=options placeholder="Search my courses..." />
            <table class="data-table">
                <thead>
                    <tr>
                        <th>"ID"</th>
                        <th>"Title"</th>
                        <th>"Category"</th>
                        <th>"Price"</th>
                        <th>"Status"</th>
                        <th>"Enrolled"</th>
                        <th>"Created"</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody>
                    {move || list.page_rows(projected).into_iter().map(|course| view! {
                        <CourseRow list=list course=course />
                    }).collect_view()}
                </tbody>
            </table>
            <Show when=move || list.loading()>
                <p class="loading">"Loading courses..."</p>
            </Show>
            <PaginationBar pager=list.pager count=count />

            <Show when=move || create_modal.with(Modal::is_open)>
                <CreateCourseModal modal=create_modal list=list />
            </Show>
        </section>
    }
}

#[component]
fn CourseRow(list: ListController<Course>, course: Course) -> impl IntoView {
    let id = course.id;
    let editing = Memo::new(move |_| list.is_editing(id));

    let on_save = move |_: ()| {
        list.save(|before, after| async move { api::update_course(&before, &after).await });
    };
    let on_delete = move |_: ()| list.confirm_delete(api::delete_course);

    let read_title = course.title.clone();
    let read_status = course.status.clone();
    let read_price = course.price;

    view! {
        <tr class:editing=move || editing.get()>
            <td>{id}</td>
            <td>
                {move || if editing.get() {
                    view! {
                        <input
                            type="text"
                            prop:value=move || list.staged_field(|c| c.title.clone())
                            on:input=move |ev| {
                                let title = event_target_value(&ev);
                                list.stage(|c| c.title = title);
                            }
                        />
                    }.into_any()
                } else {
                    view! { <a href=format!("/courses/{}", id)>{read_title.clone()}</a> }.into_any()
                }}
            </td>
            <td>{course.category.clone()}</td>
            <td>
                {move || if editing.get() {
                    view! {
                        <input
                            type="number"
                            step="0.01"
                            min="0"
                            prop:value=move || list.staged_field(|c| c.price).to_string()
                            on:change=move |ev| {
                                if let Some(price) = parse_price_input(&event_target_value(&ev)) {
                                    list.stage(|c| c.price = price);
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
                        <StatusSelect
                            options=&Course::STATUSES
                            value=Signal::derive(move || list.staged_field(|c| c.status.clone()))
                            on_change=move |status: String| list.stage(|c| c.status = status)
                        />
                    }.into_any()
                } else {
                    view! { <StatusBadge status=read_status.clone() /> }.into_any()
                }}
            </td>
            <td>{course.enrolled}</td>
            <td>{format_date(course.created_at.as_deref())}</td>
            <RowActions list=list id=id on_save=on_save on_delete=on_delete />
        </tr>
    }
}

#[component]
fn CreateCourseModal(modal: RwSignal<Modal<CourseForm>>, list: ListController<Course>) -> impl IntoView {
    let error = RwSignal::new(None::<String>);
    let submitting = RwSignal::new(false);

    let field = move |get: fn(&CourseForm) -> &String| {
        Signal::derive(move || modal.with(|m| m.field(|f| get(f).clone()).unwrap_or_default()))
    };

    let close = Callback::new(move |_: ()| modal.update(|m| m.close()));

    let submit = move |_| {
        if submitting.get_untracked() {
            return;
        }
        let Some(form) = modal.with_untracked(|m| m.snapshot()) else { return };
        let new_course = match form.to_new_course() {
            Ok(new_course) => new_course,
            Err(e) => {
                error.set(Some(e.message));
                return;
            }
        };
        error.set(None);
        submitting.set(true);
        spawn_local(async move {
            match api::create_course(&new_course).await {
                Ok(created) => {
                    list.push_created(created);
                    modal.update(|m| m.close());
                }
                Err(e) => {
                    warn!("[APP] Creating course failed: {}", e);
                    error.try_set(Some(e.user_message()));
                }
            }
            submitting.try_set(false);
        });
    };

    view! {
        <ModalFrame title="New course" on_close=close>
            <FormField
                label="Title"
                value=field(|f| &f.title)
                on_input=move |v: String| modal.update(|m| m.edit(|f| f.title = v))
            />
            <FormField
                label="Category"
                value=field(|f| &f.category)
                on_input=move |v: String| modal.update(|m| m.edit(|f| f.category = v))
            />
            <FormTextArea
                label="Description (markdown)"
                value=field(|f| &f.description)
                on_input=move |v: String| modal.update(|m| m.edit(|f| f.description = v))
            />
            <FormField
                label="Price"
                input_type="number"
                value=field(|f| &f.price)
                on_input=move |v: String| modal.update(|m| m.edit(|f| f.price = v))
            />
            <FormField
                label="Duration (weeks)"
                input_type="number"
                value=field(|f| &f.duration_weeks)
                on_input=move |v: String| modal.update(|m| m.edit(|f| f.duration_weeks = v))
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
