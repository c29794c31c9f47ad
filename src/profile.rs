//! Static page content: who Josh is, where to find him, what he has done.

pub const NAME: &str = "Josh Manzano";
pub const PORTRAIT: &str = "josh_pfp_700.png";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SocialLink {
    pub name: &'static str,
    pub href: &'static str,
    pub icon: &'static str,
}

pub const SOCIAL_LINKS: &[SocialLink] = &[
    SocialLink { name: "GitHub", href: "https://github.com/joshmanzano", icon: "gh" },
    SocialLink { name: "LinkedIn", href: "https://www.linkedin.com/in/joshmanzano-dev/", icon: "in" },
    SocialLink { name: "Contact Me", href: "https://joshmanzano.com/contact", icon: "@" },
    SocialLink { name: "Twitter", href: "https://twitter.com/joshmanzano_dev", icon: "x" },
    SocialLink { name: "Instagram", href: "https://instagram.com/joshmanzano.dev", icon: "ig" },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Highlight {
    pub image: &'static str,
    pub href: &'static str,
    pub label: &'static str,
}

pub const HIGHLIGHTS: &[Highlight] = &[
    Highlight {
        image: "yahoo.png",
        href: "https://www.linkedin.com/company/yahoo/mycompany/",
        label: "Senior Engineer",
    },
    Highlight {
        image: "taiwan_tech.png",
        href: "https://www.ntust.edu.tw/home.php?Lang=en",
        label: "Master's Graduate",
    },
    Highlight {
        image: "akads.png",
        href: "https://akadsph.com/",
        label: "Startup Co-Founder",
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Locale {
    En,
    Jp,
}

impl Locale {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "en" => Some(Locale::En),
            "jp" => Some(Locale::Jp),
            _ => None,
        }
    }
}

/// Headline shown under the chat. Unknown locales get no headline.
pub fn bio(locale: Option<Locale>) -> Option<&'static str> {
    match locale? {
        Locale::En => Some(
            "Hello there! I'm Josh, a software engineer and indie developer. I enjoy educating people for free and creating accessible, ethical software that benefits people in need.",
        ),
        Locale::Jp => Some(
            "ジョシュはシニアソフトウェアエンジニアで、困っている人々に非営利およびオープンソースソフトウェアを提供するのが大好きです！",
        ),
    }
}
