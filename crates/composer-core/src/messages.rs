//! User-facing strings.
//!
//! Every warning, validation message and summary phrase the composer shows
//! comes from here so the widget can be shipped in English or Persian.

use serde::{Deserialize, Serialize};

/// Display language of the composer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Locale {
    #[default]
    #[serde(rename = "en")]
    English,
    #[serde(rename = "fa")]
    Persian,
}

/// Message table for one locale.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Messages {
    locale: Locale,
}

impl Messages {
    pub fn new(locale: Locale) -> Self {
        Self { locale }
    }

    pub fn unsupported_file(&self, name: &str) -> String {
        match self.locale {
            Locale::English => format!("Unsupported file type: {}", name),
            Locale::Persian => format!("نوع فایل پشتیبانی نمی‌شود: {}", name),
        }
    }

    pub fn decode_failed(&self, name: &str) -> String {
        match self.locale {
            Locale::English => format!("Could not read file: {}", name),
            Locale::Persian => format!("خواندن فایل ممکن نشد: {}", name),
        }
    }

    pub fn missing_title(&self) -> &'static str {
        match self.locale {
            Locale::English => "Please enter a title",
            Locale::Persian => "لطفا عنوان را وارد کنید",
        }
    }

    pub fn missing_description(&self) -> &'static str {
        match self.locale {
            Locale::English => "Please enter a description",
            Locale::Persian => "لطفا توضیحات را وارد کنید",
        }
    }

    pub fn post_created(&self) -> &'static str {
        match self.locale {
            Locale::English => "Post created successfully.",
            Locale::Persian => "پست با موفقیت ایجاد شد.",
        }
    }

    pub fn add_more(&self) -> &'static str {
        match self.locale {
            Locale::English => "Add more",
            Locale::Persian => "بیشتر اضافه کنید",
        }
    }

    /// Phrase describing how many images and videos are selected.
    ///
    /// Empty when both counts are zero.
    pub fn selection_phrase(&self, images: usize, videos: usize) -> String {
        match self.locale {
            Locale::English => {
                let images_text = plural(images, "image", "images");
                let videos_text = plural(videos, "video", "videos");
                match (images, videos) {
                    (0, 0) => String::new(),
                    (_, 0) => format!("{} selected", images_text),
                    (0, _) => format!("{} selected", videos_text),
                    _ => format!("{} and {} selected", images_text, videos_text),
                }
            }
            Locale::Persian => match (images, videos) {
                (0, 0) => String::new(),
                (_, 0) => format!("{} عکس انتخاب شده است", images),
                (0, _) => format!("{} ویدیو انتخاب شده است", videos),
                _ => format!("{} عکس و {} ویدیو انتخاب شده است", images, videos),
            },
        }
    }
}

fn plural(count: usize, one: &str, many: &str) -> String {
    if count == 1 {
        format!("{} {}", count, one)
    } else {
        format!("{} {}", count, many)
    }
}
