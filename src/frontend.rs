use std::rc::Rc;

use gloo::events::{EventListener, EventListenerOptions, EventListenerPhase};
use gloo::render::{request_animation_frame, AnimationFrame};
use gloo::timers::future::sleep;
use gloo_net::http::Request;
use js_sys::{Date, Function, Reflect};
use serde_json::json;
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use wasm_bindgen_futures::spawn_local;
use web_sys::{
    window, Element, HtmlAnchorElement, HtmlElement, HtmlInputElement, HtmlTextAreaElement,
    ScrollBehavior, ScrollIntoViewOptions, ScrollToOptions,
};
use yew::prelude::*;

use crate::contact::{
    run_submission, ContactField, ContactFields, EmailRelay, RelayConfig, RelayError,
    RelayRequest, SubmitGate, EMAIL_RELAY_ENDPOINT,
};
use crate::content::{
    EducationRecord, ProjectRecord, BRAND_NAME, EDUCATION, GITHUB_URL, HERO_HIGHLIGHT, HERO_LEAD,
    HERO_SUMMARY, LINKEDIN_URL, OWNER_NAME, PROFILE_LINKS, PROJECTS, RESUME_DOWNLOAD_NAME,
    RESUME_PATH, ROLE_BADGE, SKILL_GROUPS,
};
use crate::indicator::{project, IndicatorStyle, NavLayout, Rect};
use crate::logging::{LogLevel, Logger};
use crate::navigation::{navigate, SectionId, SectionTargets, NAV_ITEMS};
use crate::scroll::{FrameCoalescer, ScrollTracker, SectionOffsets};
use crate::view_state::{Theme, ViewAction, ViewState};

impl Reducible for ViewState {
    type Action = ViewAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        if next.apply(action) {
            Rc::new(next)
        } else {
            self
        }
    }
}

fn apply_theme(theme: Theme) {
    if let Some(document) = window().and_then(|w| w.document()) {
        if let Some(root) = document.document_element() {
            let _ = root.set_attribute("data-theme", theme.as_str());
        }
    }
}

fn prefers_reduced_motion() -> bool {
    window()
        .and_then(|w| {
            w.match_media("(prefers-reduced-motion: reduce)")
                .ok()
                .flatten()
        })
        .map(|mq| mq.matches())
        .unwrap_or(false)
}

fn apply_theme_with_transition(theme: Theme) {
    let Some(document) = window().and_then(|w| w.document()) else {
        return;
    };
    if prefers_reduced_motion() {
        apply_theme(theme);
        return;
    }

    let document_js: JsValue = document.into();
    let start_view_transition = Reflect::get(&document_js, &JsValue::from_str("startViewTransition"))
        .ok()
        .and_then(|value| value.dyn_into::<Function>().ok());
    let Some(start_view_transition) = start_view_transition else {
        apply_theme(theme);
        return;
    };

    let callback = Closure::once_into_js(move || apply_theme(theme));
    if start_view_transition.call1(&document_js, &callback).is_err() {
        apply_theme(theme);
    }
}

fn current_scroll_y() -> f64 {
    window()
        .and_then(|w| w.scroll_y().ok())
        .unwrap_or(0.0)
}

fn scroll_window_to_top() {
    if let Some(win) = window() {
        let options = ScrollToOptions::new();
        options.set_top(0.0);
        options.set_behavior(ScrollBehavior::Smooth);
        win.scroll_to_with_scroll_to_options(&options);
    }
}

/// Opens the resume in a new tab and triggers a download through a throwaway anchor.
fn download_resume() {
    let Some(win) = window() else {
        return;
    };
    let _ = win.open_with_url_and_target(RESUME_PATH, "_blank");

    let Some(document) = win.document() else {
        return;
    };
    let Some(body) = document.body() else {
        return;
    };
    let Some(link) = document
        .create_element("a")
        .ok()
        .and_then(|element| element.dyn_into::<HtmlAnchorElement>().ok())
    else {
        return;
    };

    link.set_href(RESUME_PATH);
    link.set_download(RESUME_DOWNLOAD_NAME);
    if body.append_child(&link).is_ok() {
        link.click();
        let _ = body.remove_child(&link);
    }
}

struct HttpRelay;

impl EmailRelay for HttpRelay {
    async fn send(&self, request: &RelayRequest<'_>) -> Result<(), RelayError> {
        let response = Request::post(EMAIL_RELAY_ENDPOINT)
            .json(request)
            .map_err(|err| RelayError::Transport(err.to_string()))?
            .send()
            .await
            .map_err(|err| RelayError::Transport(err.to_string()))?;

        if response.ok() {
            Ok(())
        } else {
            Err(RelayError::Rejected {
                status: response.status(),
            })
        }
    }
}

#[derive(Clone, PartialEq)]
struct SectionRefs {
    home: NodeRef,
    projects: NodeRef,
    skills: NodeRef,
    education: NodeRef,
    contact: NodeRef,
}

impl SectionRefs {
    fn get(&self, id: SectionId) -> &NodeRef {
        match id {
            SectionId::Home => &self.home,
            SectionId::Projects => &self.projects,
            SectionId::Skills => &self.skills,
            SectionId::Education => &self.education,
            SectionId::Contact => &self.contact,
        }
    }

    fn offsets(&self) -> SectionOffsets {
        let mut offsets = SectionOffsets::new();
        for id in SectionId::ALL {
            let top = self
                .get(id)
                .cast::<HtmlElement>()
                .map(|element| f64::from(element.offset_top()));
            offsets.set(id, top);
        }
        offsets
    }
}

impl SectionTargets for SectionRefs {
    fn scroll_to(&self, id: SectionId) -> bool {
        let Some(element) = self.get(id).cast::<Element>() else {
            return false;
        };

        let options = ScrollIntoViewOptions::new();
        options.set_behavior(ScrollBehavior::Smooth);
        element.scroll_into_view_with_scroll_into_view_options(&options);
        true
    }
}

#[derive(Clone, PartialEq)]
struct NavRefs {
    container: NodeRef,
    buttons: [NodeRef; 5],
}

impl NavRefs {
    fn measure(&self) -> NavLayout {
        let rect = |node: &NodeRef| {
            node.cast::<Element>().map(|element| {
                let bounds = element.get_bounding_client_rect();
                Rect {
                    left: bounds.left(),
                    width: bounds.width(),
                }
            })
        };

        NavLayout {
            container: rect(&self.container),
            buttons: std::array::from_fn(|index| rect(&self.buttons[index])),
        }
    }
}

#[function_component(Avatar)]
fn avatar() -> Html {
    html! {
        <svg class="avatar" width="40" height="40" viewBox="0 0 100 100" aria-hidden="true">
            <defs>
                <linearGradient id="avatar-grad" x1="0" x2="1">
                    <stop offset="0%" stop-color="#d97706" />
                    <stop offset="100%" stop-color="#f59e0b" />
                </linearGradient>
            </defs>
            <rect width="100" height="100" rx="25" fill="url(#avatar-grad)" />
            <g fill="#fff" transform="translate(18,20)">
                <circle cx="32" cy="20" r="12" />
                <path d="M0 64c0-13 22-20 32-20s32 7 32 20v4H0v-4z" />
            </g>
            <circle cx="75" cy="25" r="12" fill="#a3e635" opacity="0.8" />
        </svg>
    }
}

#[derive(Properties, PartialEq)]
struct HeaderProps {
    theme: Theme,
    active: SectionId,
    indicator: IndicatorStyle,
    nav: NavRefs,
    on_navigate: Callback<SectionId>,
    on_toggle_theme: Callback<()>,
}

#[function_component(SiteHeader)]
fn site_header(props: &HeaderProps) -> Html {
    let on_brand = props.on_navigate.reform(|_: MouseEvent| SectionId::Home);
    let on_toggle = props.on_toggle_theme.reform(|_: MouseEvent| ());
    let on_resume = Callback::from(|_: MouseEvent| download_resume());

    html! {
        <header class="site-header">
            <button class="brand" type="button" aria-label="Go to home section" onclick={on_brand}>
                <Avatar />
                <span class="brand-name">{BRAND_NAME}</span>
            </button>

            <nav class="site-nav" ref={props.nav.container.clone()}>
                <span class="nav-indicator" aria-hidden="true" style={props.indicator.to_css()} />
                { for NAV_ITEMS.iter().map(|item| {
                    let id = item.id;
                    let active = props.active == id;
                    html! {
                        <button
                            key={id.as_str()}
                            type="button"
                            ref={props.nav.buttons[id.index()].clone()}
                            class={classes!("nav-item", active.then_some("is-active"))}
                            aria-current={active.then_some("page")}
                            onclick={props.on_navigate.reform(move |_: MouseEvent| id)}
                        >
                            {item.label}
                        </button>
                    }
                }) }
            </nav>

            <div class="header-actions">
                <button
                    class="theme-toggle"
                    type="button"
                    aria-label={props.theme.toggle_label()}
                    aria-pressed={props.theme.pressed().to_string()}
                    onclick={on_toggle}
                >
                    <span aria-hidden="true">{props.theme.icon()}</span>
                </button>
                <button class="resume-button" type="button" onclick={on_resume}>
                    <span aria-hidden="true">{"⤓ "}</span>{"Resume"}
                </button>
            </div>
        </header>
    }
}

#[derive(Properties, PartialEq)]
struct SectionProps {
    section_ref: NodeRef,
}

#[derive(Properties, PartialEq)]
struct HeroProps {
    section_ref: NodeRef,
    on_navigate: Callback<SectionId>,
}

#[function_component(Hero)]
fn hero(props: &HeroProps) -> Html {
    let on_contact = props.on_navigate.reform(|_: MouseEvent| SectionId::Contact);

    html! {
        <section id="home" class="hero" ref={props.section_ref.clone()}>
            <p class="role-badge"><span aria-hidden="true">{"✦ "}</span>{ROLE_BADGE}</p>
            <h1 class="hero-title">
                {HERO_LEAD}{" "}<span class="highlight">{HERO_HIGHLIGHT}</span>
            </h1>
            <p class="hero-summary">{HERO_SUMMARY}</p>
            <div class="hero-actions">
                <a class="pill" href={GITHUB_URL} target="_blank" rel="noopener noreferrer">{"GitHub"}</a>
                <a class="pill" href={LINKEDIN_URL} target="_blank" rel="noopener noreferrer">{"LinkedIn"}</a>
                <button class="pill pill-primary" type="button" onclick={on_contact}>{"Contact"}</button>
            </div>
        </section>
    }
}

#[derive(Properties, PartialEq)]
struct ProjectCardProps {
    index: usize,
    project: ProjectRecord,
    hovered: bool,
    on_hover: Callback<Option<usize>>,
}

#[function_component(ProjectCard)]
fn project_card(props: &ProjectCardProps) -> Html {
    let index = props.index;
    let onmouseenter = props.on_hover.reform(move |_: MouseEvent| Some(index));
    let onmouseleave = props.on_hover.reform(|_: MouseEvent| None);

    html! {
        <article
            class={classes!("card", "project-card", props.hovered.then_some("is-hovered"))}
            {onmouseenter}
            {onmouseleave}
        >
            <div class="project-heading">
                <h3>{props.project.title}</h3>
                <span class="external-mark" aria-hidden="true">{"↗"}</span>
            </div>
            <ul class="project-points">
                { for props.project.description.iter().map(|point| html! { <li>{*point}</li> }) }
            </ul>
            <div class="tags">
                { for props.project.tech.iter().map(|tag| html! { <span class="tag">{*tag}</span> }) }
            </div>
        </article>
    }
}

#[derive(Properties, PartialEq)]
struct ProjectsProps {
    section_ref: NodeRef,
    hovered: Option<usize>,
    on_hover: Callback<Option<usize>>,
}

#[function_component(Projects)]
fn projects(props: &ProjectsProps) -> Html {
    html! {
        <section id="projects" class="section-block" ref={props.section_ref.clone()}>
            <div class="section-heading">
                <h2>{"Featured Projects"}</h2>
                <p class="muted">{"Transforming ideas into scalable solutions with modern technologies"}</p>
            </div>
            <div class="project-grid">
                { for PROJECTS.iter().enumerate().map(|(index, project)| html! {
                    <ProjectCard
                        key={index}
                        {index}
                        project={*project}
                        hovered={props.hovered == Some(index)}
                        on_hover={props.on_hover.clone()}
                    />
                }) }
            </div>
        </section>
    }
}

#[function_component(Skills)]
fn skills(props: &SectionProps) -> Html {
    html! {
        <section id="skills" class="section-block" ref={props.section_ref.clone()}>
            <div class="section-heading">
                <h2>{"Skills & Expertise"}</h2>
                <p class="muted">{"Technologies and tools I use to bring ideas to life"}</p>
            </div>
            <div class="skill-grid">
                { for SKILL_GROUPS.iter().map(|group| html! {
                    <div class={classes!("card", "skill-card", group.accent.class())}>
                        <h3>{group.title}</h3>
                        <p>{group.items}</p>
                    </div>
                }) }
            </div>
        </section>
    }
}

fn education_card(record: &EducationRecord) -> Html {
    html! {
        <div class="card education-card">
            <h3>{record.institution}</h3>
            <p class="degree">{record.degree}</p>
            <p class="muted">{record.gpa}</p>
        </div>
    }
}

#[function_component(Education)]
fn education(props: &SectionProps) -> Html {
    html! {
        <section id="education" class="section-block" ref={props.section_ref.clone()}>
            <div class="section-heading">
                <h2><span aria-hidden="true">{"🎓 "}</span>{"Education"}</h2>
                <p class="muted">{"My academic background and qualifications"}</p>
            </div>
            <div class="education-list">
                { for EDUCATION.iter().map(education_card) }
            </div>
        </section>
    }
}

#[derive(Properties, PartialEq)]
struct ContactProps {
    section_ref: NodeRef,
    fields: ContactFields,
    in_flight: bool,
    succeeded: bool,
    on_edit: Callback<(ContactField, String)>,
    on_submit: Callback<SubmitEvent>,
}

#[function_component(Contact)]
fn contact(props: &ContactProps) -> Html {
    let on_input = |field: ContactField| {
        props.on_edit.reform(move |event: InputEvent| {
            let value = match field {
                ContactField::Message => event.target_unchecked_into::<HtmlTextAreaElement>().value(),
                _ => event.target_unchecked_into::<HtmlInputElement>().value(),
            };
            (field, value)
        })
    };

    html! {
        <section id="contact" class="section-block" ref={props.section_ref.clone()}>
            <div class="section-heading">
                <h2>{"Get In Touch"}</h2>
                <p class="muted">{"Have a project in mind? Let's create something amazing together!"}</p>
            </div>
            <form class="contact-form" onsubmit={props.on_submit.clone()}>
                <div class="field-row">
                    <label>
                        {"Your Name"}
                        <input
                            type="text"
                            name="name"
                            id="name"
                            placeholder="John Doe"
                            required={true}
                            value={props.fields.name.clone()}
                            oninput={on_input(ContactField::Name)}
                        />
                    </label>
                    <label>
                        {"Your Email"}
                        <input
                            type="email"
                            name="email"
                            id="email"
                            placeholder="john@example.com"
                            required={true}
                            value={props.fields.email.clone()}
                            oninput={on_input(ContactField::Email)}
                        />
                    </label>
                </div>
                <label>
                    {"Your Message"}
                    <textarea
                        name="message"
                        id="message"
                        rows="5"
                        placeholder="Hello, I'd like to talk about..."
                        required={true}
                        value={props.fields.message.clone()}
                        oninput={on_input(ContactField::Message)}
                    />
                </label>
                <button class="submit-button" type="submit" disabled={props.in_flight}>
                    if props.in_flight {
                        <span class="spinner" aria-hidden="true" />{"Sending..."}
                    } else {
                        {"Send Message"}
                    }
                </button>
                if props.succeeded {
                    <p class="success-message" role="status">
                        {"✓ Message sent successfully! I'll get back to you soon."}
                    </p>
                }
            </form>
        </section>
    }
}

#[function_component(Footer)]
fn footer() -> Html {
    let year = Date::new_0().get_full_year();

    html! {
        <footer class="site-footer">
            <p class="muted">{format!("© {year} {OWNER_NAME}. All Rights Reserved.")}</p>
            <ul class="footer-links">
                { for PROFILE_LINKS.iter().map(|link| if link.external {
                    html! { <li><a href={link.href} target="_blank" rel="noopener noreferrer">{link.label}</a></li> }
                } else {
                    html! { <li><a href={link.href}>{link.label}</a></li> }
                }) }
            </ul>
        </footer>
    }
}

#[function_component(App)]
fn app() -> Html {
    let logger = Logger::from_build_env();
    let state = use_reducer(ViewState::default);
    let indicator = use_state(|| IndicatorStyle::HIDDEN);
    let frame = use_mut_ref(FrameCoalescer::<AnimationFrame>::new);
    let gate = use_mut_ref(SubmitGate::default);
    let theme_applied = use_mut_ref(|| false);

    let sections = SectionRefs {
        home: use_node_ref(),
        projects: use_node_ref(),
        skills: use_node_ref(),
        education: use_node_ref(),
        contact: use_node_ref(),
    };
    let nav = NavRefs {
        container: use_node_ref(),
        buttons: [
            use_node_ref(),
            use_node_ref(),
            use_node_ref(),
            use_node_ref(),
            use_node_ref(),
        ],
    };

    use_effect_with(state.theme, move |theme| {
        let theme = *theme;
        if theme_applied.replace(true) {
            apply_theme_with_transition(theme);
            logger.event(
                LogLevel::Info,
                "theme_toggle",
                json!({ "theme": theme.as_str() }),
            );
        } else {
            apply_theme(theme);
            logger.event(
                LogLevel::Info,
                "page_mounted",
                json!({ "theme": theme.as_str() }),
            );
        }
        || ()
    });

    {
        let dispatcher = state.dispatcher();
        let sections = sections.clone();
        let frame = frame.clone();
        use_effect_with((), move |_| {
            let tracker = ScrollTracker::default();
            dispatcher.dispatch(ViewAction::Scrolled(
                tracker.read(current_scroll_y(), &sections.offsets()),
            ));

            let listener = window().map(|win| {
                let frame = frame.clone();
                EventListener::new_with_options(
                    &win,
                    "scroll",
                    EventListenerOptions {
                        phase: EventListenerPhase::Bubble,
                        passive: true,
                    },
                    move |_event| {
                        let dispatcher = dispatcher.clone();
                        let sections = sections.clone();
                        let fired = frame.clone();
                        frame.borrow_mut().schedule(move || {
                            request_animation_frame(move |_| {
                                fired.borrow_mut().complete();
                                let reading = tracker.read(current_scroll_y(), &sections.offsets());
                                dispatcher.dispatch(ViewAction::Scrolled(reading));
                            })
                        });
                    },
                )
            });

            move || {
                drop(listener);
                frame.borrow_mut().complete();
            }
        });
    }

    {
        let indicator = indicator.clone();
        let nav = nav.clone();
        use_effect_with(state.active_section, move |active| {
            indicator.set(project(*active, &nav.measure()));
            || ()
        });
    }

    let on_navigate = {
        let dispatcher = state.dispatcher();
        let sections = sections.clone();
        Callback::from(move |id: SectionId| match navigate(&sections, id) {
            Some(action) => {
                logger.event(
                    LogLevel::Info,
                    "section_navigate",
                    json!({ "section": id.as_str() }),
                );
                dispatcher.dispatch(action);
            }
            None => logger.event(
                LogLevel::Debug,
                "section_navigate_missing",
                json!({ "section": id.as_str() }),
            ),
        })
    };

    let on_scroll_top = {
        let dispatcher = state.dispatcher();
        Callback::from(move |_: MouseEvent| {
            scroll_window_to_top();
            dispatcher.dispatch(ViewAction::Navigate(SectionId::Home));
        })
    };

    let on_toggle_theme = {
        let dispatcher = state.dispatcher();
        Callback::from(move |_: ()| dispatcher.dispatch(ViewAction::ToggleTheme))
    };

    let on_hover = {
        let dispatcher = state.dispatcher();
        Callback::from(move |index: Option<usize>| {
            dispatcher.dispatch(ViewAction::HoverProject(index));
        })
    };

    let on_edit = {
        let dispatcher = state.dispatcher();
        Callback::from(move |(field, value): (ContactField, String)| {
            dispatcher.dispatch(ViewAction::EditContact(field, value));
        })
    };

    let on_submit = {
        let state = state.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();

            let Some(ticket) = gate.borrow_mut().claim() else {
                logger.event(
                    LogLevel::Warn,
                    "contact_submit_rejected",
                    json!({ "reason": "in_flight" }),
                );
                return;
            };

            state.dispatch(ViewAction::SubmitStarted(ticket));

            let fields = state.contact.clone();
            let dispatcher = state.dispatcher();
            let gate = gate.clone();
            spawn_local(async move {
                let config = RelayConfig::from_build_env();
                run_submission(
                    &HttpRelay,
                    &gate,
                    &config,
                    fields,
                    ticket,
                    &logger,
                    sleep,
                    move |event| dispatcher.dispatch(ViewAction::Submission(event)),
                )
                .await;
            });
        })
    };

    html! {
        <div class="page">
            <a class="skip-link" href="#projects">{"Skip to content"}</a>
            if state.is_scrolled {
                <button
                    class="scroll-top"
                    type="button"
                    aria-label="Back to top"
                    onclick={on_scroll_top}
                >
                    {"↑"}
                </button>
            }

            <SiteHeader
                theme={state.theme}
                active={state.active_section}
                indicator={*indicator}
                nav={nav.clone()}
                on_navigate={on_navigate.clone()}
                {on_toggle_theme}
            />

            <main>
                <Hero section_ref={sections.home.clone()} on_navigate={on_navigate.clone()} />
                <Projects
                    section_ref={sections.projects.clone()}
                    hovered={state.hovered_project}
                    {on_hover}
                />
                <Skills section_ref={sections.skills.clone()} />
                <Education section_ref={sections.education.clone()} />
                <Contact
                    section_ref={sections.contact.clone()}
                    fields={state.contact.clone()}
                    in_flight={state.submit_in_flight()}
                    succeeded={state.submit_succeeded()}
                    {on_edit}
                    {on_submit}
                />
            </main>

            <Footer />
        </div>
    }
}

pub fn run() {
    yew::Renderer::<App>::with_root(
        window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id("app"))
            .expect("missing #app mount point"),
    )
    .render();
}
