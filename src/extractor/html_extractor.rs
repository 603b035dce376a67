//! HTML页面信号提取器
//! 负责从HTML中提取title、meta description以及img/alt统计

use std::cell::{Cell, RefCell};
use html5ever::tokenizer::{
    BufferQueue, Tag, TagKind, Token, TokenSink, TokenSinkResult, Tokenizer, TokenizerOpts
};
use markup5ever::interface::Attribute;
use tendril::StrTendril;

#[derive(Debug, Default, Clone)]
pub struct HtmlExtractor {
    title: RefCell<Option<String>>,
    in_title: Cell<bool>,
    meta_tags: RefCell<Vec<(String, String)>>,
    img_count: Cell<usize>,
    img_with_alt_count: Cell<usize>,
}

impl TokenSink for HtmlExtractor {
    type Handle = ();

    fn process_token(&self, token: Token, _line: u64) -> TokenSinkResult<()> {
        match token {
            Token::TagToken(Tag { kind: TagKind::StartTag, name, attrs, .. }) => {
                match name.as_ref() {
                    "title" => self.open_title(),
                    "meta" => self.extract_meta_tags(&attrs),
                    "img" => self.count_img(&attrs),
                    _ => {}
                }
            }
            Token::TagToken(Tag { kind: TagKind::EndTag, name, .. }) => {
                if name.as_ref() == "title" {
                    self.in_title.set(false);
                }
            }
            Token::CharacterTokens(text) => {
                if self.in_title.get() {
                    if let Some(title) = self.title.borrow_mut().as_mut() {
                        title.push_str(&text);
                    }
                }
            }
            _ => {}
        }
        TokenSinkResult::Continue
    }
}

impl HtmlExtractor {
    /// 创建新的提取器
    pub fn new() -> Self {
        Self::default()
    }

    /// 从HTML字符串提取页面信号
    pub fn extract(&self, html: &str) -> Self {
        let tokenizer = Tokenizer::new(self.clone(), TokenizerOpts::default());
        let queue = BufferQueue::default();
        queue.push_back(StrTendril::from(html));

        let _ = tokenizer.feed(&queue);
        tokenizer.end();

        tokenizer.sink
    }

    // 只保留第一个 title
    fn open_title(&self) {
        let mut title = self.title.borrow_mut();
        if title.is_none() {
            *title = Some(String::new());
            self.in_title.set(true);
        }
    }

    /// 提取meta标签（name 统一小写）
    fn extract_meta_tags(&self, attrs: &[Attribute]) {
        let mut name = None;
        let mut content = None;

        for attr in attrs {
            match attr.name.local.as_ref() {
                "name" => name = Some(attr.value.to_string().to_lowercase()),
                "content" => content = Some(attr.value.to_string()),
                _ => {}
            }
        }

        if let Some(n) = name {
            self.meta_tags.borrow_mut().push((n, content.unwrap_or_default()));
        }
    }

    fn count_img(&self, attrs: &[Attribute]) {
        self.img_count.set(self.img_count.get() + 1);
        if attrs.iter().any(|attr| attr.name.local.as_ref() == "alt") {
            self.img_with_alt_count.set(self.img_with_alt_count.get() + 1);
        }
    }

    /// 获取title文本（已去除首尾空白），无title标签时返回None
    pub fn get_title(&self) -> Option<String> {
        self.title.borrow().as_ref().map(|t| t.trim().to_string())
    }

    /// 获取提取到的meta标签列表
    pub fn get_meta_tags(&self) -> Vec<(String, String)> {
        self.meta_tags.borrow().clone()
    }

    pub fn img_count(&self) -> usize {
        self.img_count.get()
    }

    /// 页面存在图片，但没有任何图片带alt属性
    pub fn images_lack_alt(&self) -> bool {
        self.img_count.get() > 0 && self.img_with_alt_count.get() == 0
    }
}
