use yew::prelude::*;

use crate::components::hero_stats::HeroStats;
use crate::components::navbar::Navbar;
use crate::config::RevealConfig;
use crate::cta::CtaDispatcher;
use crate::reveal::counter::HEADLINE;
use crate::reveal::{self, Region, RevealSinks, RevealTarget};

const FEATURES: [(&str, &str, &str, [&str; 3]); 6] = [
    (
        "01",
        "Smart AI Conversation",
        "Talk to ANITA like you would to a friend. It understands natural language, voice messages and documents, so keeping on top of money takes no effort.",
        ["Voice Integration", "File Analysis", "32 Smart Questions"],
    ),
    (
        "02",
        "Advanced Financial Analysis",
        "Precise recommendations with exact amounts. See where your money goes, compare months and find realistic ways to save more.",
        ["Category Breakdown", "Month Comparisons", "Savings Targets"],
    ),
    (
        "03",
        "Goal Setting & Tracking",
        "Set a goal and ANITA works out whether it is achievable, with progress updates and sensible deadline suggestions.",
        ["Feasibility Analysis", "Progress Tracking", "Smart Deadlines"],
    ),
    (
        "04",
        "Transaction Management",
        "Log expenses in conversation. ANITA categorizes them, catches duplicates and handles multiple currencies.",
        ["Auto Categorization", "Duplicate Prevention", "Multi-Currency"],
    ),
    (
        "05",
        "Gamification",
        "Earn XP for every financial action and level up as you track spending, set goals and build better habits.",
        ["XP System", "Daily Tracking", "Achievements"],
    ),
    (
        "06",
        "Bank-Level Security",
        "Your financial data is protected with enterprise-grade encryption. GDPR compliant, and never shared.",
        ["End-to-End Encryption", "Secure Auth", "GDPR Compliant"],
    ),
];

const STEPS: [(&str, &str, &str); 3] = [
    (
        "1",
        "Sign Up Free",
        "Create your account in seconds. No credit card required, start tracking right away.",
    ),
    (
        "2",
        "Start Chatting",
        "Log transactions by talking to ANITA. Upload receipts, send voice messages or just type.",
    ),
    (
        "3",
        "Get Insights",
        "Receive personalized insights, savings recommendations and goal suggestions.",
    ),
];

const SCREENSHOTS: [(&str, &str, &str); 3] = [
    (
        "Chat Interface",
        "Conversational AI",
        "Talk to ANITA naturally and manage your finances through simple conversations",
    ),
    (
        "Analytics Dashboard",
        "Real-time Analytics",
        "See your spending patterns, trends and insights as they happen",
    ),
    (
        "Goals & Tracking",
        "Goal Management",
        "Set financial goals and follow your progress with visual indicators",
    ),
];

#[function_component(Landing)]
pub fn landing() -> Html {
    let scrolled = use_state(|| false);
    let counts = use_state(|| vec![0u32; HEADLINE.len()]);
    let cta = (*use_state(CtaDispatcher::for_window)).clone();

    let root = use_node_ref();
    let hero_content = use_node_ref();
    let hero_media = use_node_ref();
    let stats = use_node_ref();
    let features_header = use_node_ref();
    let features_grid = use_node_ref();
    let steps_header = use_node_ref();
    let steps = use_node_ref();
    let screenshots_header = use_node_ref();
    let screenshots_grid = use_node_ref();
    let cta_block = use_node_ref();
    let footer = use_node_ref();

    let targets = vec![
        RevealTarget::new(Region::HeroContent, hero_content.clone()),
        RevealTarget::new(Region::HeroMedia, hero_media.clone()).with_delay(150),
        RevealTarget::new(Region::SectionHeader("features"), features_header.clone()),
        RevealTarget::new(Region::FeatureGrid, features_grid.clone()).with_delay(100),
        RevealTarget::new(Region::SectionHeader("how it works"), steps_header.clone()),
        RevealTarget::new(Region::Steps, steps.clone()).with_delay(100),
        RevealTarget::new(Region::SectionHeader("screenshots"), screenshots_header.clone()),
        RevealTarget::new(Region::Screenshots, screenshots_grid.clone()).with_delay(100),
        RevealTarget::new(Region::CallToAction, cta_block.clone()),
        RevealTarget::new(Region::Footer, footer.clone()),
    ];

    // Install reveal animations once the nodes exist; the returned handle
    // tears everything down when the page unmounts.
    {
        let scrolled = scrolled.clone();
        let counts = counts.clone();
        let root = root.clone();
        let stats = stats.clone();
        use_effect_with_deps(
            move |_| {
                let sinks = RevealSinks {
                    on_scrolled: {
                        let scrolled = scrolled.clone();
                        Callback::from(move |value: bool| scrolled.set(value))
                    },
                    on_counters: {
                        let counts = counts.clone();
                        Callback::from(move |values: Vec<u32>| counts.set(values))
                    },
                };
                let handle =
                    match reveal::install(RevealConfig::default(), &root, &targets, &stats, sinks) {
                        Ok(handle) => Some(handle),
                        Err(err) => {
                            log::warn!("landing: scroll reveal disabled: {}", err);
                            counts.set(HEADLINE.iter().map(|&(_, target, _)| target).collect());
                            None
                        }
                    };
                move || drop(handle)
            },
            (),
        );
    }

    html! {
        <div class="landing-page" ref={root}>
            <style>{LANDING_CSS}</style>
            <Navbar scrolled={*scrolled} cta={cta.clone()} />

            <section class="hero">
                <div class="hero-background">
                    <div class="gradient-orb orb-1"></div>
                    <div class="gradient-orb orb-2"></div>
                </div>
                <div class="hero-content reveal" ref={hero_content}>
                    <div class="hero-badge">
                        <span>{"🤖 AI-Powered Personal Finance"}</span>
                        <span class="beta-badge">{"Currently in Beta"}</span>
                    </div>
                    <h1 class="hero-title">
                        {"ANITA"}
                        <br />
                        <span class="gradient-text">{"Personal Finance Assistant"}</span>
                    </h1>
                    <p class="hero-tagline">
                        {"Manage money through conversation. Get number-driven insights, track spending naturally and reach your goals with personal financial guidance."}
                    </p>
                    <div class="hero-cta-group">
                        <button
                            class="cta-button primary"
                            onclick={cta.onclick()}
                            ontouchend={cta.ontouchend()}
                        >
                            {"Get Started"}
                        </button>
                    </div>
                    <HeroStats values={(*counts).clone()} node={stats} />
                </div>
                <div class="hero-image reveal" ref={hero_media}>
                    <div class="screenshot-placeholder">
                        <div class="placeholder-content">
                            <div class="placeholder-icon">{"📱"}</div>
                            <p>{"App Screenshot"}</p>
                        </div>
                    </div>
                </div>
            </section>

            <section id="features" class="features">
                <div class="section-header reveal" ref={features_header}>
                    <span class="section-badge">{"Key Features"}</span>
                    <h2 class="section-title">{"Everything You Need to Master Your Finances"}</h2>
                    <p class="section-description">
                        {"ANITA pairs conversational AI with careful financial analysis to give you insights you can act on."}
                    </p>
                </div>
                <div class="features-grid reveal" ref={features_grid}>
                    { for FEATURES.iter().map(|(number, title, description, highlights)| html! {
                        <div class="feature-card">
                            <div class="feature-number">{*number}</div>
                            <h3 class="feature-title">{*title}</h3>
                            <p class="feature-description">{*description}</p>
                            <div class="feature-highlights">
                                { for highlights.iter().map(|highlight| html! {
                                    <div class="highlight-item">{*highlight}</div>
                                }) }
                            </div>
                        </div>
                    }) }
                </div>
            </section>

            <section id="how-it-works" class="how-it-works">
                <div class="section-header reveal" ref={steps_header}>
                    <span class="section-badge">{"Simple Process"}</span>
                    <h2 class="section-title">{"Get Started in Minutes"}</h2>
                    <p class="section-description">
                        {"Three simple steps to transform your financial management"}
                    </p>
                </div>
                <div class="steps-container reveal" ref={steps}>
                    { for STEPS.iter().enumerate().map(|(index, (number, title, description))| html! {
                        <>
                            if index > 0 {
                                <div class="step-connector"></div>
                            }
                            <div class="step-card">
                                <div class="step-number">{*number}</div>
                                <h3 class="step-title">{*title}</h3>
                                <p class="step-description">{*description}</p>
                            </div>
                        </>
                    }) }
                </div>
            </section>

            <section class="screenshots">
                <div class="section-header reveal" ref={screenshots_header}>
                    <span class="section-badge">{"See It In Action"}</span>
                    <h2 class="section-title">{"Experience ANITA"}</h2>
                </div>
                <div class="screenshots-grid reveal" ref={screenshots_grid}>
                    { for SCREENSHOTS.iter().map(|(label, title, description)| html! {
                        <div class="screenshot-card">
                            <div class="screenshot-placeholder">
                                <div class="placeholder-content">
                                    <div class="screenshot-label">{*label}</div>
                                </div>
                            </div>
                            <h4>{*title}</h4>
                            <p>{*description}</p>
                        </div>
                    }) }
                </div>
            </section>

            <section class="cta-section">
                <div class="cta-content reveal" ref={cta_block}>
                    <h2 class="cta-title">{"Ready to Transform Your Finances?"}</h2>
                    <p class="cta-description">
                        {"Join the beta and take control of your financial future with ANITA"}
                    </p>
                    <button
                        class="cta-button large"
                        onclick={cta.onclick()}
                        ontouchend={cta.ontouchend()}
                    >
                        {"Get Started"}
                    </button>
                    <p class="pricing-note">{"Pricing available in the webapp"}</p>
                </div>
            </section>

            <footer class="footer reveal" ref={footer}>
                <div class="footer-content">
                    <div class="footer-section">
                        <div class="footer-logo">
                            <span class="logo-text">{"ANITA"}</span>
                            <span class="logo-subtitle">{"Personal Finance Assistant"}</span>
                        </div>
                        <p class="footer-description">
                            {"Your intelligent financial companion powered by AI"}
                        </p>
                    </div>
                    <div class="footer-section">
                        <h4 class="footer-heading">{"Product"}</h4>
                        <a href="#features" class="footer-link">{"Features"}</a>
                        <a href="#how-it-works" class="footer-link">{"How It Works"}</a>
                        <p class="footer-note">{"Pricing available in the webapp"}</p>
                    </div>
                    <div class="footer-section">
                        <h4 class="footer-heading">{"Company"}</h4>
                        <a href="#about" class="footer-link">{"About"}</a>
                        <a href="#contact" class="footer-link">{"Contact"}</a>
                        <a href="#careers" class="footer-link">{"Careers"}</a>
                    </div>
                    <div class="footer-section">
                        <h4 class="footer-heading">{"Legal"}</h4>
                        <a href="#privacy" class="footer-link">{"Privacy Policy"}</a>
                        <a href="#terms" class="footer-link">{"Terms of Service"}</a>
                        <a href="#security" class="footer-link">{"Security"}</a>
                    </div>
                </div>
                <div class="footer-bottom">
                    <p class="footer-copyright">{"© 2024 ANITA Finance Advisor. All rights reserved."}</p>
                </div>
            </footer>
        </div>
    }
}

const LANDING_CSS: &str = r#"
    .landing-page {
        background: #0b0d12;
        color: #e8eaf0;
        font-family: 'Inter', system-ui, sans-serif;
        overflow-x: hidden;
    }
    .reveal-armed .reveal {
        opacity: 0;
        transform: translateY(24px);
        transition: opacity 0.7s ease-out, transform 0.7s ease-out;
    }
    .reveal-armed .reveal.visible {
        opacity: 1;
        transform: none;
    }
    @media (prefers-reduced-motion: reduce) {
        .reveal-armed .reveal {
            transform: none;
            transition: none;
        }
    }
    .navbar {
        position: fixed;
        top: 0;
        left: 0;
        right: 0;
        z-index: 100;
        padding: 1.25rem 0;
        transition: background 0.3s ease, padding 0.3s ease, box-shadow 0.3s ease;
    }
    .navbar.scrolled {
        background: rgba(11, 13, 18, 0.92);
        backdrop-filter: blur(12px);
        padding: 0.75rem 0;
        box-shadow: 0 1px 0 rgba(255, 255, 255, 0.06);
    }
    .nav-container, .footer-content {
        max-width: 1200px;
        margin: 0 auto;
        padding: 0 2rem;
        display: flex;
        justify-content: space-between;
        align-items: center;
    }
    .nav-logo, .footer-logo {
        display: flex;
        flex-direction: column;
    }
    .logo-text {
        font-weight: 800;
        letter-spacing: 0.12em;
    }
    .logo-subtitle {
        font-size: 0.75rem;
        color: #8a90a2;
    }
    .nav-links {
        display: flex;
        gap: 1.5rem;
        align-items: center;
    }
    .nav-link, .footer-link {
        color: #c4c8d4;
        text-decoration: none;
    }
    .nav-cta, .cta-button {
        border: none;
        border-radius: 999px;
        cursor: pointer;
        font-weight: 600;
        background: linear-gradient(45deg, #4f7cff, #7eb2ff);
        color: #fff;
        padding: 0.6rem 1.4rem;
        touch-action: manipulation;
    }
    .cta-button.primary { padding: 0.9rem 2rem; font-size: 1.05rem; }
    .cta-button.large { padding: 1.1rem 2.6rem; font-size: 1.15rem; }
    .hero {
        position: relative;
        min-height: 100vh;
        display: grid;
        grid-template-columns: 1.1fr 0.9fr;
        gap: 3rem;
        align-items: center;
        max-width: 1200px;
        margin: 0 auto;
        padding: 8rem 2rem 4rem;
    }
    .hero-background { position: absolute; inset: 0; z-index: -1; }
    .gradient-orb {
        position: absolute;
        border-radius: 50%;
        filter: blur(80px);
        opacity: 0.35;
    }
    .orb-1 { width: 420px; height: 420px; background: #4f7cff; top: 10%; left: -10%; }
    .orb-2 { width: 360px; height: 360px; background: #a45cff; bottom: 5%; right: -5%; }
    .hero-badge { display: flex; gap: 0.75rem; flex-wrap: wrap; margin-bottom: 1.5rem; }
    .beta-badge {
        padding: 0.2rem 0.7rem;
        border-radius: 999px;
        background: rgba(126, 178, 255, 0.15);
        color: #7eb2ff;
    }
    .hero-title { font-size: 3.5rem; line-height: 1.1; margin: 0 0 1.5rem; }
    .gradient-text {
        background: linear-gradient(45deg, #fff, #7eb2ff);
        -webkit-background-clip: text;
        -webkit-text-fill-color: transparent;
    }
    .hero-tagline { font-size: 1.15rem; color: #b3b8c6; margin-bottom: 2rem; }
    .hero-stats { display: flex; gap: 2.5rem; margin-top: 3rem; }
    .stat-number { font-size: 2rem; font-weight: 800; font-variant-numeric: tabular-nums; }
    .stat-label { color: #8a90a2; font-size: 0.9rem; }
    .screenshot-placeholder {
        border: 1px dashed rgba(255, 255, 255, 0.15);
        border-radius: 24px;
        min-height: 320px;
        display: flex;
        align-items: center;
        justify-content: center;
        background: rgba(255, 255, 255, 0.02);
    }
    .placeholder-content { text-align: center; color: #8a90a2; }
    .placeholder-icon { font-size: 3rem; }
    .features, .how-it-works, .screenshots, .cta-section {
        max-width: 1200px;
        margin: 0 auto;
        padding: 6rem 2rem;
    }
    .section-header { text-align: center; max-width: 720px; margin: 0 auto 3.5rem; }
    .section-badge {
        text-transform: uppercase;
        letter-spacing: 0.1em;
        font-size: 0.8rem;
        color: #7eb2ff;
    }
    .section-title { font-size: 2.4rem; margin: 0.75rem 0; }
    .section-description { color: #b3b8c6; }
    .features-grid, .screenshots-grid {
        display: grid;
        grid-template-columns: repeat(auto-fit, minmax(300px, 1fr));
        gap: 1.5rem;
    }
    .feature-card, .step-card, .screenshot-card {
        background: rgba(255, 255, 255, 0.03);
        border: 1px solid rgba(255, 255, 255, 0.06);
        border-radius: 20px;
        padding: 2rem;
    }
    .feature-number, .step-number { color: #7eb2ff; font-weight: 700; }
    .feature-highlights { display: flex; flex-wrap: wrap; gap: 0.5rem; margin-top: 1rem; }
    .highlight-item {
        font-size: 0.8rem;
        padding: 0.25rem 0.7rem;
        border-radius: 999px;
        background: rgba(126, 178, 255, 0.1);
    }
    .steps-container { display: flex; align-items: center; gap: 1rem; }
    .step-card { flex: 1; text-align: center; }
    .step-connector { width: 48px; height: 2px; background: rgba(126, 178, 255, 0.4); }
    .cta-content { text-align: center; }
    .cta-title { font-size: 2.6rem; }
    .pricing-note, .footer-note { color: #8a90a2; font-size: 0.85rem; }
    .footer { border-top: 1px solid rgba(255, 255, 255, 0.06); padding: 4rem 0 2rem; }
    .footer-content { align-items: flex-start; gap: 2rem; }
    .footer-section { display: flex; flex-direction: column; gap: 0.5rem; }
    .footer-bottom { text-align: center; margin-top: 3rem; color: #6b7080; }
    @media (max-width: 768px) {
        .hero { grid-template-columns: 1fr; padding-top: 6rem; }
        .hero-title { font-size: 2.5rem; }
        .hero-stats { gap: 1.5rem; }
        .nav-link { display: none; }
        .steps-container { flex-direction: column; }
        .step-connector { width: 2px; height: 32px; }
        .footer-content { flex-direction: column; }
    }
"#;
