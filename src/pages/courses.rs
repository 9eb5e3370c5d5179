//! Course catalog
//!
//! Typing filters the loaded courses immediately; once typing settles the
//! catalog is refetched with the query so the server can match more.

use leptos::prelude::*;

use crate::api;
use crate::components::{ListToolbar, PaginationBar};
use crate::config::app_config;
use crate::error::ApiError;
use crate::list::{status_options, FilterField, FilterState, ListController, SortKey};
use crate::markdown::excerpt;
use crate::models::{format_price, Course};

const EXCERPT_CHARS: usize = 140;

async fn fetch_catalog(query: String) -> Result<Vec<Course>, ApiError> {
    let courses = if query.trim().is_empty() {
        api::list_courses().await?
    } else {
        api::search_courses(query.trim()).await?
    };
    Ok(courses.into_iter().filter(Course::is_published).collect())
}

#[component]
pub fn CoursesPage() -> impl IntoView {
    let list = ListController::<Course>::new(
        "course",
        FilterState::on_category().with_sort(SortKey::DateDesc),
        app_config().page_size,
    );
    let projected = list.projection();
    let count = Signal::derive(move || projected.with(Vec::len));
    let options = Signal::derive(move || list.collection.with(|c| status_options(c.items(), FilterField::Category)));

    list.load(|| fetch_catalog(String::new()));

    let on_settle = Callback::new(move |query: String| list.load(move || fetch_catalog(query)));

    view! {
        <section class="catalog">
            <h1>"Courses"</h1>
            <ListToolbar
                filter=list.filter
                options=options
                on_settle=on_settle
                placeholder="Search courses, trainers..."
                filter_label="Category"
            />
            <Show when=move || list.loading()>
                <p class="loading">"Loading courses..."</p>
            </Show>
            <Show when=move || !list.loading() && count.get() == 0>
                <p class="empty">"No courses match your search."</p>
            </Show>
            <div class="course-grid">
                {move || list.page_rows(projected).into_iter().map(|course| view! { <CourseCard course=course /> }).collect_view()}
            </div>
            <PaginationBar pager=list.pager count=count />
        </section>
    }
}

#[component]
fn CourseCard(course: Course) -> impl IntoView {
    let href = format!("/courses/{}", course.id);
    let trainer = course.trainer_name.clone().unwrap_or_else(|| "FitHub trainer".to_string());

    view! {
        <article class="course-card">
            <a href=href>
                <h3>{course.title.clone()}</h3>
            </a>
            <p class="course-meta">
                <span class="course-category">{course.category.clone()}</span>
                " · "
                <span>{format!("{} weeks", course.duration_weeks)}</span>
                " · "
                <span>{trainer}</span>
            </p>
            <p class="course-excerpt">{excerpt(&course.description, EXCERPT_CHARS)}</p>
            <p class="course-price">{format_price(course.price)}</p>
        </article>
    }
}
