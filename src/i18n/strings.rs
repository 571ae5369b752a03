//! Translation tables
//!
//! One flat `(key, text)` table per language. Keys are shared across tables;
//! a key missing from a table falls back to the key itself at lookup time.

pub(super) const TR: &[(&str, &str)] = &[
    ("app_name", "Stock AI Analyzer"),
    // Navigation
    ("nav_home", "Anasayfa"),
    ("nav_analyze", "Analiz"),
    ("nav_settings", "Ayarlar"),
    // Price dashboard
    ("page_title", "Anlık Borsa Fiyatları"),
    ("page_subtitle", "Gerçek zamanlı hisse senedi ve kripto para fiyatları"),
    ("tab_popular", "Popüler Hisseler"),
    ("tab_crypto", "Kripto Paralar"),
    ("tab_borsa", "Borsa İstanbul"),
    ("loading", "Yükleniyor..."),
    ("volume", "Hacim:"),
    ("market_cap", "Piyasa Değeri:"),
    ("last_updated", "Son güncelleme:"),
    // Analysis
    ("analyze_title", "AI Destekli Borsa Analizi"),
    ("analyze_subtitle", "Gemini AI ile günlük, haftalık, kısa ve uzun vadeli analiz"),
    ("symbol_label", "Borsa Kodu / Sembol"),
    ("symbol_placeholder", "Örn: AAPL, BTC, THYAO.IS"),
    ("analysis_type_label", "Analiz Türü Seçin:"),
    ("analysis_daily", "Günlük"),
    ("analysis_weekly", "Haftalık"),
    ("analysis_short_term", "Kısa Vade"),
    ("analysis_long_term", "Uzun Vade"),
    ("daily_period", "1 Gün"),
    ("weekly_period", "1 Hafta"),
    ("short_term_period", "1-3 Ay"),
    ("long_term_period", "6-12 Ay"),
    ("analysis_label_daily", "Günlük Analiz"),
    ("analysis_label_weekly", "Haftalık Analiz"),
    ("analysis_label_short_term", "Kısa Vade Analizi"),
    ("analysis_label_long_term", "Uzun Vade Analizi"),
    ("analyze_btn", "Analiz Yap"),
    ("price_label", "Fiyat:"),
    ("change_label", "Değişim:"),
    ("change_percent_label", "Değişim %:"),
    ("analysis_report", "AI Analiz Raporu"),
    ("price_chart", "Fiyat Grafiği"),
    ("question_title", "Soru Sor"),
    ("question_placeholder", "Analiz hakkında bir soru sorun..."),
    ("ask_btn", "Sor"),
    // Settings
    ("settings_title", "Ayarlar"),
    ("settings_subtitle", "Gemini API ve model ayarlarını yapılandırın"),
    ("api_key_label", "Gemini API Key"),
    ("model_label", "Model Adı"),
    ("save_btn", "Ayarları Kaydet"),
    ("test_btn", "Test"),
    ("testing", "Test Ediliyor..."),
    ("testing_model", "Model test ediliyor..."),
    ("testing_api_key", "API key test ediliyor..."),
    ("test_success", "Model testi başarılı!"),
    ("test_api_key_success", "API key geçerli!"),
    ("test_error", "Model testi sırasında hata"),
    ("test_api_key_error", "API key testi sırasında hata"),
    ("error_api_key_for_test", "Test için önce API key girin"),
    ("error_api_key_required", "Lütfen önce API key girin"),
    ("test_unknown_error", "Bilinmeyen bir hata oluştu"),
    ("current_settings", "Mevcut Ayarlar"),
    ("api_key_status", "API Key Durumu"),
    ("current_model", "Mevcut Model"),
    ("current_api_key", "Mevcut API Key"),
    ("configured", "Yapılandırıldı"),
    ("not_configured", "Yapılandırılmadı"),
    // Messages
    ("saving", "Kaydediliyor..."),
    ("save_success", "Ayarlar başarıyla kaydedildi!"),
    ("error_no_symbol", "Lütfen bir borsa kodu girin."),
    (
        "error_no_data",
        "Bu sembol için geçerli fiyat verisi bulunamadı. Lütfen farklı bir sembol deneyin.",
    ),
    ("error_loading_prices", "Fiyatlar yüklenirken bir hata oluştu"),
    ("analyzing", "AI analiz yapılıyor..."),
    ("answering", "Yanıtlanıyor..."),
    ("error_analyzing", "Analiz yapılırken bir hata oluştu"),
    ("error_answering", "Soru yanıtlanırken bir hata oluştu"),
    ("error_no_analysis", "Önce bir analiz yapmalısınız."),
    ("error_loading_settings", "Ayarlar yüklenirken bir hata oluştu"),
    ("error_saving_settings", "Ayarlar kaydedilirken bir hata oluştu"),
    ("error_no_settings", "Lütfen en az bir ayar girin."),
    // Disclaimer
    ("disclaimer_title", "Önemli Uyarı"),
    (
        "disclaimer_text",
        "Bu uygulamada sunulan analizler ve bilgiler yalnızca bilgilendirme amaçlıdır ve yatırım tavsiyesi niteliği taşımamaktadır. Yatırım kararları kendi risk ve sorumluluğunuzdadır. Lütfen yatırım yapmadan önce profesyonel danışmanlık alınız.",
    ),
    ("disclaimer_close", "Anladım"),
    (
        "footer_disclaimer",
        "Bu uygulamada sunulan analizler yatırım tavsiyesi niteliği taşımamaktadır.",
    ),
    // News
    ("analyze_news_btn", "İlgili Haberleri Analiz Et"),
    ("news_analysis_title", "Haber Analizi"),
    ("analyzing_news", "Haberler analiz ediliyor..."),
    ("error_analyzing_news", "Haberler analiz edilirken bir hata oluştu"),
    ("no_news_found", "Bu sembol için haber bulunamadı"),
];

pub(super) const EN: &[(&str, &str)] = &[
    ("app_name", "Stock AI Analyzer"),
    // Navigation
    ("nav_home", "Home"),
    ("nav_analyze", "Analyze"),
    ("nav_settings", "Settings"),
    // Price dashboard
    ("page_title", "Real-Time Stock Prices"),
    ("page_subtitle", "Real-time stock and cryptocurrency prices"),
    ("tab_popular", "Popular Stocks"),
    ("tab_crypto", "Cryptocurrencies"),
    ("tab_borsa", "Istanbul Stock Exchange"),
    ("loading", "Loading..."),
    ("volume", "Volume:"),
    ("market_cap", "Market Cap:"),
    ("last_updated", "Last update:"),
    // Analysis
    ("analyze_title", "AI-Powered Stock Analysis"),
    (
        "analyze_subtitle",
        "Daily, weekly, short-term and long-term analysis with Gemini AI",
    ),
    ("symbol_label", "Stock Code / Symbol"),
    ("symbol_placeholder", "E.g: AAPL, BTC, THYAO.IS"),
    ("analysis_type_label", "Select Analysis Type:"),
    ("analysis_daily", "Daily"),
    ("analysis_weekly", "Weekly"),
    ("analysis_short_term", "Short Term"),
    ("analysis_long_term", "Long Term"),
    ("daily_period", "1 Day"),
    ("weekly_period", "1 Week"),
    ("short_term_period", "1-3 Months"),
    ("long_term_period", "6-12 Months"),
    ("analysis_label_daily", "Daily Analysis"),
    ("analysis_label_weekly", "Weekly Analysis"),
    ("analysis_label_short_term", "Short-Term Analysis"),
    ("analysis_label_long_term", "Long-Term Analysis"),
    ("analyze_btn", "Analyze"),
    ("price_label", "Price:"),
    ("change_label", "Change:"),
    ("change_percent_label", "Change %:"),
    ("analysis_report", "AI Analysis Report"),
    ("price_chart", "Price Chart"),
    ("question_title", "Ask Question"),
    ("question_placeholder", "Ask a question about the analysis..."),
    ("ask_btn", "Ask"),
    // Settings
    ("settings_title", "Settings"),
    ("settings_subtitle", "Configure Gemini API and model settings"),
    ("api_key_label", "Gemini API Key"),
    ("model_label", "Model Name"),
    ("save_btn", "Save Settings"),
    ("test_btn", "Test"),
    ("testing", "Testing..."),
    ("testing_model", "Testing model..."),
    ("testing_api_key", "Testing API key..."),
    ("test_success", "Model test successful!"),
    ("test_api_key_success", "API key is valid!"),
    ("test_error", "Error testing model"),
    ("test_api_key_error", "Error testing API key"),
    ("error_api_key_for_test", "Please enter API key first for testing"),
    ("error_api_key_required", "Please enter API key first"),
    ("test_unknown_error", "An unknown error occurred"),
    ("current_settings", "Current Settings"),
    ("api_key_status", "API Key Status"),
    ("current_model", "Current Model"),
    ("current_api_key", "Current API Key"),
    ("configured", "Configured"),
    ("not_configured", "Not Configured"),
    // Messages
    ("saving", "Saving..."),
    ("save_success", "Settings saved successfully!"),
    ("error_no_symbol", "Please enter a stock code."),
    (
        "error_no_data",
        "No valid price data found for this symbol. Please try a different symbol.",
    ),
    ("error_loading_prices", "An error occurred while loading prices"),
    ("analyzing", "AI is analyzing..."),
    ("answering", "Answering..."),
    ("error_analyzing", "An error occurred while analyzing"),
    ("error_answering", "An error occurred while answering the question"),
    ("error_no_analysis", "You must perform an analysis first."),
    ("error_loading_settings", "An error occurred while loading settings"),
    ("error_saving_settings", "An error occurred while saving settings"),
    ("error_no_settings", "Please enter at least one setting."),
    // Disclaimer
    ("disclaimer_title", "Important Notice"),
    (
        "disclaimer_text",
        "The analyses and information provided in this application are for informational purposes only and do not constitute investment advice. Investment decisions are at your own risk and responsibility. Please consult a professional advisor before making any investment.",
    ),
    ("disclaimer_close", "I Understand"),
    (
        "footer_disclaimer",
        "The analyses provided in this application do not constitute investment advice.",
    ),
    // News
    ("analyze_news_btn", "Analyze Related News"),
    ("news_analysis_title", "News Analysis"),
    ("analyzing_news", "Analyzing news..."),
    ("error_analyzing_news", "An error occurred while analyzing news"),
    ("no_news_found", "No news found for this symbol"),
];
