//! Course detail page

use leptos::logging::{log, warn};
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::{use_navigate, use_params_map};

use crate::api;
use crate::list::Id;
use crate::markdown::render_description;
use crate::models::{format_date, format_price, Course, Role, Trainer};
use crate::store::{
    notify, store_cache_generation, store_cache_trainer, store_cached_trainer, store_role, use_app_store, AppStore,
    ToastKind,
};

#[derive(Debug, Clone, PartialEq)]
enum Loaded<T> {
    Loading,
    Ready(T),
    Missing(String),
}

#[component]
pub fn CourseDetailPage() -> impl IntoView {
    let store = use_app_store();
    let params = use_params_map();
    let course_id = Memo::new(move |_| params.with(|p| p.get("id")).and_then(|raw| raw.parse::<Id>().ok()));

    let course = RwSignal::new(Loaded::<Course>::Loading);
    let trainer = RwSignal::new(None::<Trainer>);

    Effect::new(move |_| {
        let Some(id) = course_id.get() else {
            course.set(Loaded::Missing("Course not found".to_string()));
            return;
        };
        course.set(Loaded::Loading);
        trainer.set(None);
        spawn_local(async move {
            let result = api::get_course(id).await;
            // A newer navigation owns the page now
            if course_id.try_get_untracked().flatten() != Some(id) {
                return;
            }
            match result {
                Ok(loaded) => {
                    if let Some(trainer_id) = loaded.trainer_id {
                        load_trainer(store, trainer_id, trainer);
                    }
                    course.set(Loaded::Ready(loaded));
                }
                Err(e) => {
                    warn!("[APP] Loading course {} failed: {}", id, e);
                    course.set(Loaded::Missing(e.user_message()));
                }
            }
        });
    });

    view! {
        <section class="course-detail">
            {move || match course.get() {
                Loaded::Loading => view! { <p class="loading">"Loading course..."</p> }.into_any(),
                Loaded::Missing(message) => view! {
                    <div class="empty">
                        <p>{message}</p>
                        <a href="/courses">"Back to courses"</a>
                    </div>
                }.into_any(),
                Loaded::Ready(c) => view! { <CourseBody course=c trainer=trainer /> }.into_any(),
            }}
        </section>
    }
}

/// Trainer profiles are shared by every course of that trainer, so they go
/// through the store cache.
fn load_trainer(store: AppStore, trainer_id: Id, target: RwSignal<Option<Trainer>>) {
    if let Some(cached) = store_cached_trainer(&store, trainer_id) {
        target.set(Some(cached));
        return;
    }
    let generation = store_cache_generation(&store);
    spawn_local(async move {
        match api::get_trainer(trainer_id).await {
            Ok(fetched) => {
                if !store_cache_trainer(&store, generation, fetched.clone()) {
                    log!("[APP] Trainer {} fetched across a navigation, not cached", trainer_id);
                }
                target.try_set(Some(fetched));
            }
            Err(e) => warn!("[APP] Loading trainer {} failed: {}", trainer_id, e),
        }
    });
}

#[component]
fn CourseBody(course: Course, trainer: RwSignal<Option<Trainer>>) -> impl IntoView {
    let store = use_app_store();
    let navigate = use_navigate();
    let enrolling = RwSignal::new(false);
    let course_id = course.id;

    let enroll = move |_| {
        match store_role(&store) {
            None => {
                navigate("/login", Default::default());
                return;
            }
            Some(Role::Trainee) => {}
            Some(_) => return,
        }
        if enrolling.get_untracked() {
            return;
        }
        enrolling.set(true);
        let navigate = navigate.clone();
        spawn_local(async move {
            match api::enroll(course_id).await {
                Ok(order) => {
                    log!("[APP] Enrolled in course {} (order {})", course_id, order.id);
                    notify(&store, ToastKind::Success, "Enrolled! Your order is pending payment.");
                    navigate("/orders", Default::default());
                }
                Err(e) => {
                    warn!("[APP] Enrolment in course {} failed: {}", course_id, e);
                    notify(&store, ToastKind::Error, format!("Could not enrol: {}", e.user_message()));
                }
            }
            enrolling.try_set(false);
        });
    };

    // Trainers, gyms and stores browse but cannot enrol
    let can_enrol = move || matches!(store_role(&store), None | Some(Role::Trainee));
    let description = render_description(&course.description);

    view! {
        <header class="course-header">
            <h1>{course.title.clone()}</h1>
            <p class="course-meta">
                <span class="course-category">{course.category.clone()}</span>
                " · "
                {format!("{} weeks", course.duration_weeks)}
                " · "
                {format!("{} enrolled", course.enrolled)}
                " · "
                {format!("since {}", format_date(course.created_at.as_deref()))}
            </p>
            <p class="course-price">{format_price(course.price)}</p>
            <Show when=can_enrol>
                <button class="btn btn-primary" disabled=move || enrolling.get() on:click=enroll.clone()>
                    {move || if enrolling.get() { "Enrolling..." } else { "Enrol now" }}
                </button>
            </Show>
        </header>

        <div class="course-description markdown" inner_html=description></div>

        {move || trainer.get().map(|t| view! { <TrainerCard trainer=t /> })}
    }
}

#[component]
fn TrainerCard(trainer: Trainer) -> impl IntoView {
    view! {
        <aside class="trainer-card">
            <h3>{trainer.name.clone()}</h3>
            <p class="trainer-meta">
                {trainer.specialty.clone()}
                " · "
                {format!("{} years", trainer.years_experience)}
                " · "
                {format!("★ {:.1}", trainer.rating)}
            </p>
            <p>{trainer.bio.clone()}</p>
        </aside>
    }
}
